use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, PageTransitionEvent};

use crate::config::{COUNTER_DURATION_MS, COUNTER_THRESHOLD, FRAME_INTERVAL_MS};
use crate::dom;
use crate::error::SiteError;
use crate::frame::{FrameLoop, Tick};
use crate::observer::{self, Visibility};

const COUNTED: &str = "counted";

/// What the element should show after a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterFrame {
    Counting(String),
    Finished(String),
}

/// Linear count-up from zero to `target`.
#[derive(Debug, Clone)]
pub struct Counter {
    target: i64,
    current: f64,
    increment: f64,
    suffix: String,
}

impl Counter {
    pub fn new(target: i64, suffix: impl Into<String>) -> Self {
        let frames = f64::from(COUNTER_DURATION_MS / FRAME_INTERVAL_MS);
        Counter {
            target,
            current: 0.0,
            increment: target as f64 / frames,
            suffix: suffix.into(),
        }
    }

    pub fn advance(&mut self) -> CounterFrame {
        self.current += self.increment;
        if self.current < self.target as f64 {
            CounterFrame::Counting(group_thousands(self.current.floor() as i64))
        } else {
            self.current = self.target as f64;
            CounterFrame::Finished(format!("{}{}", group_thousands(self.target), self.suffix))
        }
    }
}

/// Integer prefix of `raw`: leading whitespace, an optional sign, then digits.
/// Values beyond `i64` saturate.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// An explicit `data-suffix` wins. Without one, a raw target of "98" is a
/// percentage and everything else is a "+" count.
pub fn suffix_for(raw_target: &str, explicit: Option<String>) -> String {
    match explicit {
        Some(suffix) => suffix,
        None if raw_target == "98" => "%".to_string(),
        None => "+".to_string(),
    }
}

/// Formats with "," between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn install(document: &Document) -> Result<(), SiteError> {
    let running: Rc<RefCell<Vec<FrameLoop>>> = Rc::new(RefCell::new(Vec::new()));

    let started = running.clone();
    let observed = observer::watch(
        document,
        ".stat-number",
        Visibility::at(COUNTER_THRESHOLD),
        move |element, _| {
            if dom::has_class(element, COUNTED) {
                return;
            }
            match animate(element) {
                Ok(Some(handle)) => {
                    let mut running = started.borrow_mut();
                    running.retain(FrameLoop::is_running);
                    running.push(handle);
                }
                Ok(None) => {}
                Err(err) => log::warn!("counter did not start: {}", err),
            }
            dom::add_class(element, COUNTED);
        },
    )?;

    let window = dom::window()?;
    dom::listen(&window, "pagehide", move |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .map(PageTransitionEvent::persisted);
        if cancels_on_pagehide(persisted) {
            for handle in running.borrow_mut().drain(..) {
                handle.cancel();
            }
        }
    })?;

    log::debug!("watching {} counters", observed);
    Ok(())
}

/// A page kept in the back/forward cache resumes its frames on return, and its
/// counters are already marked `counted`, so only a discarded page cancels.
fn cancels_on_pagehide(persisted: Option<bool>) -> bool {
    !persisted.unwrap_or(false)
}

fn animate(element: &Element) -> Result<Option<FrameLoop>, SiteError> {
    let Some(raw) = element.get_attribute("data-target") else {
        return Ok(None);
    };
    let Some(target) = parse_target(&raw) else {
        log::warn!("ignoring counter with non-numeric target {:?}", raw);
        return Ok(None);
    };
    let mut counter = Counter::new(target, suffix_for(&raw, element.get_attribute("data-suffix")));

    let element = element.clone();
    let handle = FrameLoop::start(move || {
        if !element.is_connected() {
            return Tick::Done;
        }
        match counter.advance() {
            CounterFrame::Counting(text) => {
                element.set_text_content(Some(&text));
                Tick::Continue
            }
            CounterFrame::Finished(text) => {
                element.set_text_content(Some(&text));
                Tick::Done
            }
        }
    })?;
    Ok(Some(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(counter: &mut Counter) -> (usize, String) {
        for frame in 1..=1000 {
            if let CounterFrame::Finished(text) = counter.advance() {
                return (frame, text);
            }
        }
        panic!("counter never finished");
    }

    #[test]
    fn percent_counter_finishes_with_percent() {
        let raw = "98";
        let mut counter = Counter::new(parse_target(raw).unwrap(), suffix_for(raw, None));
        let (_, text) = run_to_end(&mut counter);
        assert_eq!(text, "98%");
    }

    #[test]
    fn large_counter_is_grouped_with_plus() {
        let raw = "1500";
        let mut counter = Counter::new(parse_target(raw).unwrap(), suffix_for(raw, None));
        let (frames, text) = run_to_end(&mut counter);
        assert_eq!(text, "1,500+");
        assert!((124..=126).contains(&frames), "took {} frames", frames);
    }

    #[test]
    fn explicit_suffix_overrides_legacy_rule() {
        assert_eq!(suffix_for("98", Some("x".into())), "x");
        assert_eq!(suffix_for("50", Some("%".into())), "%");
        assert_eq!(suffix_for("980", None), "+");
    }

    #[test]
    fn intermediate_values_climb_and_stay_below_target() {
        let mut counter = Counter::new(1000, "+");
        let mut last = -1;
        loop {
            match counter.advance() {
                CounterFrame::Counting(text) => {
                    let value: i64 = text.replace(',', "").parse().unwrap();
                    assert!(value >= last);
                    assert!(value < 1000);
                    last = value;
                }
                CounterFrame::Finished(text) => {
                    assert_eq!(text, "1,000+");
                    break;
                }
            }
        }
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = Counter::new(0, "+");
        assert_eq!(counter.advance(), CounterFrame::Finished("0+".to_string()));
    }

    #[test]
    fn parses_integer_prefix() {
        assert_eq!(parse_target("1500"), Some(1500));
        assert_eq!(parse_target("  42px"), Some(42));
        assert_eq!(parse_target("-7"), Some(-7));
        assert_eq!(parse_target("+9"), Some(9));
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("-"), None);
    }

    #[test]
    fn oversized_target_saturates() {
        assert_eq!(parse_target("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_target("-99999999999999999999"), Some(-i64::MAX));
    }

    #[test]
    fn only_a_discarded_page_cancels_counters() {
        assert!(!cancels_on_pagehide(Some(true)));
        assert!(cancels_on_pagehide(Some(false)));
        assert!(cancels_on_pagehide(None));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1500), "-1,500");
    }
}
