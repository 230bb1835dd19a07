use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::config::{TOAST_FADE_MS, TOAST_VISIBLE_MS};
use crate::dom;
use crate::error::SiteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    // Part of the toast styling contract even though no binding shows one yet.
    #[allow(dead_code)]
    Info,
    Success,
    Error,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Info => "info",
            Kind::Success => "success",
            Kind::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Kind::Info => "info-circle",
            Kind::Success => "check-circle",
            Kind::Error => "exclamation-circle",
        }
    }
}

/// Holds at most one occupant. Every occupant gets a fresh id so that late
/// callbacks can tell whether they still refer to the current one.
#[derive(Debug)]
pub struct Slot<T> {
    last_id: u64,
    current: Option<(u64, T)>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot { last_id: 0, current: None }
    }
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the current occupant, then installs whatever `build` makes
    /// under a fresh id. If `build` fails the slot is left empty.
    pub fn replace_with<E, F>(&mut self, build: F) -> Result<u64, E>
    where
        F: FnOnce(u64) -> Result<T, E>,
    {
        drop(self.take());
        self.last_id += 1;
        let id = self.last_id;
        let value = build(id)?;
        self.current = Some((id, value));
        Ok(id)
    }

    pub fn take(&mut self) -> Option<T> {
        self.current.take().map(|(_, value)| value)
    }

    /// Takes the occupant only if it is still `id`.
    pub fn take_if(&mut self, id: u64) -> Option<T> {
        match self.current {
            Some((current, _)) if current == id => self.take(),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref().map(|(_, value)| value)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// A toast on screen. Dropping it cancels its timers and removes the element.
struct Toast {
    element: Element,
    _fade: Timeout,
    _expire: Timeout,
    _on_close: Closure<dyn FnMut(Event)>,
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.element.remove();
    }
}

/// Shows one toast at a time; a newer message always replaces the older one.
pub struct Notifier {
    document: Document,
    slot: Rc<RefCell<Slot<Toast>>>,
}

impl Notifier {
    pub fn new(document: Document) -> Self {
        Notifier {
            document,
            slot: Rc::new(RefCell::new(Slot::new())),
        }
    }

    pub fn present(&self, message: &str, kind: Kind) -> Result<(), SiteError> {
        let body = dom::body(&self.document)?;
        let id = self.slot.borrow_mut().replace_with(|id| {
            let toast = self.arm(id, self.build(message, kind)?)?;
            body.append_child(&toast.element)?;
            Ok::<_, SiteError>(toast)
        })?;
        log::debug!("notification {} shown ({})", id, kind.as_str());
        Ok(())
    }

    fn build(&self, message: &str, kind: Kind) -> Result<Element, SiteError> {
        let document = &self.document;
        let element = document.create_element("div")?;
        element.set_class_name(&format!("notification notification-{}", kind.as_str()));

        let text = document.create_element("span")?;
        text.set_text_content(Some(message));

        let close = document.create_element("button")?;
        close.set_class_name("notification-close");
        let close_icon = dom::icon(document, "times")?;
        close.append_child(&close_icon)?;

        let icon = dom::icon(document, kind.icon())?;
        element.append_child(&icon)?;
        element.append_child(&text)?;
        element.append_child(&close)?;
        Ok(element)
    }

    fn arm(&self, id: u64, element: Element) -> Result<Toast, SiteError> {
        let fading = element.clone();
        let fade = Timeout::new(TOAST_VISIBLE_MS, move || {
            dom::add_class(&fading, "fade-out");
        });

        let expire = Timeout::new(TOAST_VISIBLE_MS + TOAST_FADE_MS, release(&self.slot, id));

        let on_close = Closure::<dyn FnMut(Event)>::new({
            let mut release = Some(release(&self.slot, id));
            move |_: Event| {
                if let Some(release) = release.take() {
                    release();
                }
            }
        });
        if let Some(button) = element.query_selector(".notification-close")? {
            button.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
        }

        Ok(Toast {
            element,
            _fade: fade,
            _expire: expire,
            _on_close: on_close,
        })
    }
}

fn release(slot: &Rc<RefCell<Slot<Toast>>>, id: u64) -> impl FnOnce() + 'static {
    let slot: Weak<RefCell<Slot<Toast>>> = Rc::downgrade(slot);
    move || {
        if let Some(slot) = slot.upgrade() {
            let released = slot.borrow_mut().take_if(id);
            if released.is_some() {
                log::debug!("notification {} dismissed", id);
            }
            drop(released);
        }
    }
}
