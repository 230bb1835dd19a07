use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

// Scroll offsets in px
pub const HEADER_SCROLLED_AFTER: f64 = 100.0;
pub const BACK_TO_TOP_AFTER: f64 = 500.0;
pub const PARALLAX_RATE: f64 = 0.5;
pub const SCROLL_INDICATOR_CLEARANCE: f64 = 80.0;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub const COUNTER_THRESHOLD: f64 = 0.5;
pub const COUNTER_DURATION_MS: u32 = 2000;
pub const FRAME_INTERVAL_MS: u32 = 16; // ~60 fps

pub const TOAST_VISIBLE_MS: u32 = 5000;
pub const TOAST_FADE_MS: u32 = 300;
