use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::dom;
use crate::error::SiteError;
use crate::observer::{self, Visibility};

const LAZY: &str = "lazy";

/// The source to load when an image comes into view. Only an image still
/// marked lazy is swapped, and only when it carries a `data-src`.
pub fn swap_source(still_lazy: bool, data_src: Option<String>) -> Option<String> {
    if still_lazy {
        data_src
    } else {
        None
    }
}

pub fn install(document: &Document) -> Result<(), SiteError> {
    let observed = observer::watch(document, "img.lazy", Visibility::default(), |element, observer| {
        observer.unobserve(element);
        let still_lazy = dom::has_class(element, LAZY);
        if let Some(src) = swap_source(still_lazy, element.get_attribute("data-src")) {
            match element.dyn_ref::<HtmlImageElement>() {
                Some(image) => image.set_src(&src),
                None => {
                    let _ = element.set_attribute("src", &src);
                }
            }
        }
        dom::remove_class(element, LAZY);
    })?;
    log::debug!("watching {} lazy images", observed);
    Ok(())
}
