use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions};

use crate::config::SCROLL_INDICATOR_CLEARANCE;
use crate::dom;
use crate::error::{self, SiteError};

const MENU_ID: &str = "navLinks";
const MENU_OPEN: &str = "active";
const NAV_LINKS: &str = ".nav-links a";

/// Page name the navigation links are compared against.
pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(page) if !page.is_empty() => page,
        _ => "index.html",
    }
}

pub fn install(document: &Document) -> Result<(), SiteError> {
    error::report([
        ("mobile menu", install_menu(document)),
        ("current page link", highlight_current(document)),
        ("smooth anchors", install_anchors(document)),
        ("scroll indicator", install_scroll_indicator(document)),
    ]);
    Ok(())
}

fn install_menu(document: &Document) -> Result<(), SiteError> {
    if let Some(toggle) = dom::select(document, ".mobile-menu-toggle") {
        let document = document.clone();
        dom::listen(&toggle, "click", move |_| {
            if let Some(menu) = document.get_element_by_id(MENU_ID) {
                let _ = menu.class_list().toggle(MENU_OPEN);
            }
        })?;
    }

    for link in dom::select_all(document, NAV_LINKS)? {
        let document = document.clone();
        dom::listen(&link, "click", move |_| {
            if let Some(menu) = document.get_element_by_id(MENU_ID) {
                dom::remove_class(&menu, MENU_OPEN);
            }
        })?;
    }
    Ok(())
}

fn highlight_current(document: &Document) -> Result<(), SiteError> {
    let pathname = dom::window()?.location().pathname()?;
    let page = current_page(&pathname);
    for link in dom::select_all(document, NAV_LINKS)? {
        let is_current = link.get_attribute("href").as_deref() == Some(page);
        dom::set_class(&link, "active", is_current);
    }
    Ok(())
}

fn install_anchors(document: &Document) -> Result<(), SiteError> {
    for anchor in dom::select_all(document, r##"a[href^="#"]"##)? {
        let document = document.clone();
        let href_source = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            event.prevent_default();
            let Some(href) = href_source.get_attribute("href") else {
                return;
            };
            if let Some(target) = dom::select(&document, &href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn install_scroll_indicator(document: &Document) -> Result<(), SiteError> {
    let Some(indicator) = dom::select(document, ".scroll-indicator") else {
        return Ok(());
    };
    dom::listen(&indicator, "click", |_| {
        let Ok(window) = dom::window() else {
            return;
        };
        let height = window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or_default();
        let options = ScrollToOptions::new();
        options.set_top(height - SCROLL_INDICATOR_CLEARANCE);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_by_with_scroll_to_options(&options);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_index() {
        assert_eq!(current_page("/"), "index.html");
        assert_eq!(current_page(""), "index.html");
        assert_eq!(current_page("/site/"), "index.html");
    }

    #[test]
    fn last_segment_is_the_page() {
        assert_eq!(current_page("/about.html"), "about.html");
        assert_eq!(current_page("/docs/services.html"), "services.html");
        assert_eq!(current_page("contact.html"), "contact.html");
    }
}
