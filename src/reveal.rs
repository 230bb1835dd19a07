use web_sys::Document;

use crate::config::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use crate::dom;
use crate::error::SiteError;
use crate::observer::{self, Visibility};

/// Marks `.animate-on-scroll` elements visible the first time they show up.
/// The class stays once added.
pub fn install(document: &Document) -> Result<(), SiteError> {
    let visibility = Visibility::at(REVEAL_THRESHOLD).with_margin(REVEAL_ROOT_MARGIN);
    let observed = observer::watch(document, ".animate-on-scroll", visibility, |element, _| {
        dom::add_class(element, "visible");
    })?;
    log::debug!("watching {} reveal targets", observed);
    Ok(())
}
