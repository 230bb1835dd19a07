use web_sys::{Document, Element};

use crate::dom;
use crate::error::SiteError;

const ITEM: &str = ".faq-item";
const OPEN: &str = "active";

/// Which item is open after `clicked` is toggled, given the current states.
/// An open item closes everything; a closed one becomes the only open item.
pub fn after_click(open: &[bool], clicked: usize) -> Option<usize> {
    match open.get(clicked) {
        Some(true) => None,
        Some(false) => Some(clicked),
        None => None,
    }
}

pub fn install(document: &Document) -> Result<(), SiteError> {
    for control in dom::select_all(document, ".faq-item .faq-question")? {
        let document = document.clone();
        let source = control.clone();
        dom::listen(&control, "click", move |_| {
            if let Err(err) = toggle(&document, &source) {
                log::warn!("FAQ toggle failed: {}", err);
            }
        })?;
    }
    Ok(())
}

fn toggle(document: &Document, control: &Element) -> Result<(), SiteError> {
    let Some(item) = control.closest(ITEM)? else {
        return Ok(());
    };
    let items = dom::select_all(document, ITEM)?;
    let Some(clicked) = items.iter().position(|candidate| *candidate == item) else {
        return Ok(());
    };

    let states: Vec<bool> = items.iter().map(|item| dom::has_class(item, OPEN)).collect();
    let open = after_click(&states, clicked);
    for (i, item) in items.iter().enumerate() {
        dom::set_class(item, OPEN, open == Some(i));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(states: &mut [bool], clicked: usize) {
        let open = after_click(states, clicked);
        for (i, state) in states.iter_mut().enumerate() {
            *state = open == Some(i);
        }
    }

    #[test]
    fn opening_second_closes_first() {
        let mut states = [false; 3];
        apply(&mut states, 0);
        assert_eq!(states, [true, false, false]);
        apply(&mut states, 2);
        assert_eq!(states, [false, false, true]);
    }

    #[test]
    fn clicking_open_item_closes_all() {
        let mut states = [false, true, false];
        apply(&mut states, 1);
        assert_eq!(states, [false; 3]);
    }

    #[test]
    fn never_more_than_one_open() {
        let mut states = [false; 4];
        for clicked in [0, 1, 1, 3, 2, 2, 0, 3] {
            apply(&mut states, clicked);
            assert!(states.iter().filter(|open| **open).count() <= 1);
        }
    }

    #[test]
    fn stray_index_closes_everything() {
        assert_eq!(after_click(&[true, false], 5), None);
    }
}
