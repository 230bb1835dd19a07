use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser plumbing itself. Missing page elements are not
/// errors; bindings treat them as absent and do nothing.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SiteError::Dom(message)
    }
}

/// Logs how each independently installed binding went and returns how many
/// failed. One failure never stops the rest from being installed.
pub fn report<'a, I>(bindings: I) -> usize
where
    I: IntoIterator<Item = (&'a str, Result<(), SiteError>)>,
{
    let mut failed = 0;
    for (name, result) in bindings {
        match result {
            Ok(()) => log::info!("{} ready", name),
            Err(err) => {
                log::warn!("{} not installed: {}", name, err);
                failed += 1;
            }
        }
    }
    failed
}
