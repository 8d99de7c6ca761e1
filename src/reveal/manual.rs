//! Host-driven viewport observer.
//!
//! [`ManualObserver`] does no geometry of its own. Whoever holds a handle
//! decides when an element enters or leaves the view and pushes that in as
//! a batch. Embedders that already receive intersection callbacks from their
//! platform forward them through it; tests use it to script scroll sequences.

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::observer::{
    IntersectionEntry, IntersectionHandler, ObserverOptions, ViewportObserver, WatchTarget,
};

#[derive(Default)]
struct Inner {
    unsupported: bool,
    fail_connect: bool,
    fail_next_observe: bool,
    options: Option<ObserverOptions>,
    handler: Option<IntersectionHandler>,
    observed: HashMap<String, WatchTarget>,
}

/// Observer whose notifications are pushed in by the host.
///
/// Cloning yields another handle to the same observer, so the host can keep
/// one while the tracker owns the other. Elements are identified by name.
#[derive(Clone, Default)]
pub struct ManualObserver {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for ManualObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualObserver")
            .field("unsupported", &inner.unsupported)
            .field("connected", &inner.handler.is_some())
            .field("observed", &inner.observed)
            .finish_non_exhaustive()
    }
}

impl ManualObserver {
    /// Creates a supported observer with nothing observed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an observer that reports the capability as missing.
    #[must_use]
    pub fn unsupported() -> Self {
        let observer = Self::default();
        observer.inner.borrow_mut().unsupported = true;
        observer
    }

    /// Creates an observer that claims support but refuses to connect.
    #[must_use]
    pub fn failing_connect() -> Self {
        let observer = Self::default();
        observer.inner.borrow_mut().fail_connect = true;
        observer
    }

    /// Makes the next `observe` call fail.
    pub fn fail_next_observe(&self) {
        self.inner.borrow_mut().fail_next_observe = true;
    }

    /// Whether a handler is installed.
    pub fn is_connected(&self) -> bool {
        self.inner.borrow().handler.is_some()
    }

    /// Options passed on connect, if connected.
    pub fn options(&self) -> Option<ObserverOptions> {
        self.inner.borrow().options
    }

    /// Whether `element` is being observed.
    pub fn is_observing(&self, element: &str) -> bool {
        self.inner.borrow().observed.contains_key(element)
    }

    /// Number of live observations.
    pub fn observed_count(&self) -> usize {
        self.inner.borrow().observed.len()
    }

    /// Target `element` is reported under, if observed.
    pub fn target_of(&self, element: &str) -> Option<WatchTarget> {
        self.inner.borrow().observed.get(element).copied()
    }

    /// Reports `element` as fully in view.
    pub fn enter(&self, element: &str) {
        self.emit([(element, true)]);
    }

    /// Reports `element` as out of view.
    pub fn leave(&self, element: &str) {
        self.emit([(element, false)]);
    }

    /// Delivers one batch of enter (`true`) / leave (`false`) changes.
    ///
    /// Elements that are not observed are skipped.
    pub fn emit<'a>(&self, changes: impl IntoIterator<Item = (&'a str, bool)>) {
        let entries: Vec<IntersectionEntry> = {
            let inner = self.inner.borrow();
            changes
                .into_iter()
                .filter_map(|(element, entering)| {
                    let target = *inner.observed.get(element)?;
                    Some(if entering {
                        IntersectionEntry::entered(target)
                    } else {
                        IntersectionEntry::left(target)
                    })
                })
                .collect()
        };
        self.emit_entries(&entries);
    }

    /// Delivers raw entries as one batch. A no-op when disconnected.
    pub fn emit_entries(&self, entries: &[IntersectionEntry]) {
        if entries.is_empty() {
            return;
        }

        // The handler runs without the observer borrowed
        let handler = self.inner.borrow_mut().handler.take();
        if let Some(mut handler) = handler {
            handler(entries);
            let mut inner = self.inner.borrow_mut();
            if inner.handler.is_none() {
                inner.handler = Some(handler);
            }
        }
    }
}

impl ViewportObserver for ManualObserver {
    type Element = str;

    fn is_supported(&self) -> bool {
        !self.inner.borrow().unsupported
    }

    fn connect(&mut self, options: ObserverOptions, handler: IntersectionHandler) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_connect {
            anyhow::bail!("Observer refused the connection");
        }
        if inner.handler.is_some() {
            anyhow::bail!("Observer is already connected");
        }
        inner.options = Some(options);
        inner.handler = Some(handler);
        Ok(())
    }

    fn observe(&mut self, target: WatchTarget, element: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if std::mem::take(&mut inner.fail_next_observe) {
            anyhow::bail!("Cannot observe element '{element}'");
        }
        inner.observed.insert(element.to_string(), target);
        Ok(())
    }

    fn unobserve(&mut self, target: WatchTarget) {
        self.inner
            .borrow_mut()
            .observed
            .retain(|_, observed| *observed != target);
    }

    fn disconnect(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.handler = None;
        inner.options = None;
        inner.observed.clear();
    }
}
