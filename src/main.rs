use std::rc::Rc;

use log::{error, info};
use web_sys::Document;

mod config;
mod contact;
mod counter;
mod dom;
mod error;
mod faq;
mod frame;
mod lazy;
mod nav;
mod notify;
mod observer;
mod reveal;
mod scroll;
mod styles;

use error::SiteError;
use notify::Notifier;

fn enhance(document: &Document) {
    let notifier = Rc::new(Notifier::new(document.clone()));

    error::report([
        ("navigation", nav::install(document)),
        ("scroll effects", scroll::install(document)),
        ("reveal", reveal::install(document)),
        ("counters", counter::install(document)),
        ("contact form", contact::install(document, notifier)),
        ("faq", faq::install(document)),
        ("lazy images", lazy::install(document)),
        ("page load", mark_loaded(document)),
    ]);
}

fn mark_loaded(document: &Document) -> Result<(), SiteError> {
    let body = dom::body(document)?;
    if document.ready_state() == "complete" {
        dom::add_class(&body, "loaded");
        return Ok(());
    }
    let window = dom::window()?;
    dom::listen(&window, "load", move |_| {
        dom::add_class(&body, "loaded");
    })
}

fn boot() -> Result<(), SiteError> {
    let document = dom::document()?;
    styles::inject(&document)?;

    if document.ready_state() != "loading" {
        enhance(&document);
        return Ok(());
    }

    let target = document.clone();
    dom::listen(&target, "DOMContentLoaded", move |_| enhance(&document))
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site enhancements");
    if let Err(err) = boot() {
        error!("site enhancements did not start: {}", err);
    }
}
