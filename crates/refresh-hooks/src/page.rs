#![forbid(unsafe_code)]

//! Page-ready listeners.
//!
//! Besides partial-page updates, a server-driven UI sees whole-page events:
//! a full reload, or an anchor (fragment) change that re-activates the page
//! without a navigation. [`PageReadyHooks`] lets application code observe
//! those, receiving the page URL the client reported.
//!
//! Same rules as the post-update registry: append-only, listeners run in
//! registration order, and a panicking listener does not stop the rest.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, error, trace};

use crate::hooks::panic_message;

/// A registered page-ready listener.
type Listener = Box<dyn FnMut(&str)>;

/// Registry of listeners fired when a page becomes ready.
#[derive(Default)]
pub struct PageReadyHooks {
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for PageReadyHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageReadyHooks")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PageReadyHooks {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener to run on each page-ready event.
    ///
    /// The listener receives the page URL reported by the client.
    pub fn register(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
        trace!(listeners = self.listeners.len(), "registered page-ready listener");
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Invoke every listener with the page URL, in registration order.
    ///
    /// Called by the host framework when the page loads or its anchor
    /// changes. A panicking listener is caught and logged; the remaining
    /// listeners still run.
    pub fn notify_ready(&mut self, page_url: &str) {
        debug!(listeners = self.listeners.len(), url = page_url, "page ready");
        for (index, listener) in self.listeners.iter_mut().enumerate() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener(page_url))) {
                error!(
                    listener = index,
                    panic = panic_message(payload.as_ref()),
                    "page-ready listener panicked"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_receive_url_in_order() {
        let mut hooks = PageReadyHooks::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second"] {
            let log = Rc::clone(&log);
            hooks.register(move |url| log.borrow_mut().push(format!("{label}:{url}")));
        }

        hooks.notify_ready("https://example.com/#inbox");
        assert_eq!(
            *log.borrow(),
            vec![
                "first:https://example.com/#inbox",
                "second:https://example.com/#inbox"
            ]
        );
    }

    #[test]
    fn each_ready_event_notifies_again() {
        let mut hooks = PageReadyHooks::new();
        let urls = Rc::new(RefCell::new(Vec::new()));
        let urls_clone = Rc::clone(&urls);
        hooks.register(move |url| urls_clone.borrow_mut().push(url.to_string()));

        hooks.notify_ready("https://example.com/");
        hooks.notify_ready("https://example.com/#settings");
        assert_eq!(urls.borrow().len(), 2);
    }

    #[test]
    fn panicking_listener_is_isolated() {
        let mut hooks = PageReadyHooks::new();
        let reached = Rc::new(RefCell::new(false));

        hooks.register(|_| panic!("bad listener"));
        let reached_clone = Rc::clone(&reached);
        hooks.register(move |_| *reached_clone.borrow_mut() = true);

        hooks.notify_ready("https://example.com/");
        assert!(*reached.borrow());
        assert_eq!(hooks.listener_count(), 2);
    }

    #[test]
    fn no_listeners_is_a_no_op() {
        let mut hooks = PageReadyHooks::new();
        hooks.notify_ready("https://example.com/");
        assert_eq!(hooks.listener_count(), 0);
    }
}
