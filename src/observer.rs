use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::error::SiteError;

/// Observer tuning. `Default` leaves both to the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visibility {
    pub threshold: Option<f64>,
    pub root_margin: Option<&'static str>,
}

impl Visibility {
    pub fn at(threshold: f64) -> Self {
        Visibility { threshold: Some(threshold), root_margin: None }
    }

    pub fn with_margin(mut self, margin: &'static str) -> Self {
        self.root_margin = Some(margin);
        self
    }
}

/// Observes every element matching `selector` and calls `on_visible` for each
/// one that enters the viewport. Returns how many elements are observed.
pub fn watch<F>(
    document: &Document,
    selector: &str,
    visibility: Visibility,
    mut on_visible: F,
) -> Result<usize, SiteError>
where
    F: FnMut(&Element, &IntersectionObserver) + 'static,
{
    let targets = dom::select_all(document, selector)?;
    if targets.is_empty() {
        return Ok(0);
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    on_visible(&entry.target(), &observer);
                }
            }
        },
    );

    let observer = if visibility.threshold.is_none() && visibility.root_margin.is_none() {
        IntersectionObserver::new(callback.as_ref().unchecked_ref())?
    } else {
        let init = IntersectionObserverInit::new();
        if let Some(threshold) = visibility.threshold {
            init.set_threshold(&JsValue::from_f64(threshold));
        }
        if let Some(margin) = visibility.root_margin {
            init.set_root_margin(margin);
        }
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?
    };
    callback.forget();

    for target in &targets {
        observer.observe(target);
    }
    Ok(targets.len())
}
