use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config::{BACK_TO_TOP_AFTER, HEADER_SCROLLED_AFTER, PARALLAX_RATE};
use crate::dom;
use crate::error::SiteError;
use crate::frame::{self, FrameGate};

/// Presentation derived from a single scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub header_scrolled: bool,
    pub parallax_offset: f64,
    pub back_to_top_visible: bool,
}

impl ScrollFrame {
    pub fn at(scroll_y: f64) -> Self {
        ScrollFrame {
            header_scrolled: scroll_y > HEADER_SCROLLED_AFTER,
            parallax_offset: scroll_y * PARALLAX_RATE,
            back_to_top_visible: scroll_y > BACK_TO_TOP_AFTER,
        }
    }
}

struct Targets {
    header: Option<Element>,
    hero: Option<HtmlElement>,
    back_to_top: Element,
}

impl Targets {
    fn apply(&self, frame: ScrollFrame) {
        if let Some(header) = &self.header {
            dom::set_class(header, "scrolled", frame.header_scrolled);
        }
        if let Some(hero) = &self.hero {
            let _ = hero
                .style()
                .set_property("background-position-y", &format!("{}px", frame.parallax_offset));
        }
        dom::set_class(&self.back_to_top, "visible", frame.back_to_top_visible);
    }
}

pub fn install(document: &Document) -> Result<(), SiteError> {
    let window = dom::window()?;
    let targets = Rc::new(Targets {
        header: dom::select(document, ".header"),
        hero: dom::select(document, ".hero").and_then(|hero| hero.dyn_into::<HtmlElement>().ok()),
        back_to_top: back_to_top_button(document)?,
    });

    let gate = Rc::new(FrameGate::new());

    let on_frame = {
        let gate = gate.clone();
        let targets = targets.clone();
        let window = window.clone();
        Closure::<dyn FnMut(f64)>::new(move |_: f64| {
            gate.disarm();
            if let Ok(scroll_y) = window.scroll_y() {
                targets.apply(ScrollFrame::at(scroll_y));
            }
        })
    };

    dom::listen(&window, "scroll", move |_| {
        if gate.arm() {
            if let Err(err) = frame::request_frame(&on_frame) {
                gate.disarm();
                log::warn!("scroll frame not scheduled: {}", err);
            }
        }
    })
}

fn back_to_top_button(document: &Document) -> Result<Element, SiteError> {
    let button = document.create_element("button")?;
    button.set_class_name("back-to-top");
    let icon = dom::icon(document, "arrow-up")?;
    button.append_child(&icon)?;

    dom::listen(&button, "click", |_| {
        if let Ok(window) = dom::window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    })?;

    dom::body(document)?.append_child(&button)?;
    Ok(button)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_page_is_plain() {
        let frame = ScrollFrame::at(0.0);
        assert!(!frame.header_scrolled);
        assert!(!frame.back_to_top_visible);
        assert_eq!(frame.parallax_offset, 0.0);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert!(!ScrollFrame::at(100.0).header_scrolled);
        assert!(ScrollFrame::at(100.5).header_scrolled);
        assert!(!ScrollFrame::at(500.0).back_to_top_visible);
        assert!(ScrollFrame::at(501.0).back_to_top_visible);
    }

    #[test]
    fn between_thresholds_only_header_changes() {
        let frame = ScrollFrame::at(300.0);
        assert!(frame.header_scrolled);
        assert!(!frame.back_to_top_visible);
    }

    #[test]
    fn parallax_moves_at_half_speed() {
        assert_eq!(ScrollFrame::at(301.0).parallax_offset, 150.5);
        assert_eq!(ScrollFrame::at(1200.0).parallax_offset, 600.0);
    }
}
