//! Accent preference store.
//!
//! The store is the single source of truth for the active accent. It is
//! hydrated once from preference storage at startup, falls back to a default
//! when nothing valid is stored, and writes every change straight back.
//! Storage failures never escape: reads degrade to the default and writes
//! degrade to an in-memory-only preference.

use std::fmt;

use tracing::{debug, warn};

use crate::constants::ACCENT_STORAGE_KEY;
use crate::models::{AccentColor, AccentPalette, DEFAULT_ACCENT};
use crate::storage::PreferenceStorage;

/// Identifier for a registered accent change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeListener = Box<dyn FnMut(AccentColor)>;

/// Owns the active accent and its backing storage.
///
/// Construct one per session and hand out references; consumers read through
/// [`AccentStore::current`] and mutate only through [`AccentStore::set_accent`].
pub struct AccentStore<S: PreferenceStorage> {
    storage: S,
    current: AccentColor,
    default: AccentColor,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener_id: u64,
}

impl<S: PreferenceStorage> fmt::Debug for AccentStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccentStore")
            .field("current", &self.current)
            .field("default", &self.default)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: PreferenceStorage> AccentStore<S> {
    /// Hydrates the store from `storage`, falling back to [`DEFAULT_ACCENT`].
    pub fn initialize(storage: S) -> Self {
        Self::initialize_with_default(storage, DEFAULT_ACCENT)
    }

    /// Hydrates the store from `storage`, falling back to `default`.
    ///
    /// Missing, unreadable and unrecognized values all resolve to `default`.
    pub fn initialize_with_default(storage: S, default: AccentColor) -> Self {
        let current = read_stored_accent(&storage).unwrap_or(default);
        debug!(accent = %current, "Accent store initialized");

        Self {
            storage,
            current,
            default,
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    /// Returns the active accent.
    pub fn current(&self) -> AccentColor {
        self.current
    }

    /// Returns the fallback accent this store was initialized with.
    pub fn default_accent(&self) -> AccentColor {
        self.default
    }

    /// Returns the presentation tokens for the active accent.
    pub fn palette(&self) -> AccentPalette {
        AccentPalette::for_accent(self.current)
    }

    /// Makes `accent` active and persists it.
    ///
    /// The write happens on every call, including repeats of the current
    /// value. Listeners run only when the active accent actually changes.
    pub fn set_accent(&mut self, accent: AccentColor) {
        let previous = self.current;
        self.current = accent;

        if let Err(e) = self.storage.write(ACCENT_STORAGE_KEY, accent.name()) {
            warn!(accent = %accent, error = %e, "Failed to persist accent; keeping it in memory only");
        }

        if previous != accent {
            debug!(from = %previous, to = %accent, "Accent changed");
            self.notify(accent);
        }
    }

    /// Switches back to the default accent.
    pub fn reset(&mut self) {
        self.set_accent(self.default);
    }

    /// Re-reads storage, picking up a value written by another session.
    ///
    /// Returns the active accent afterwards. A missing or corrupt value leaves
    /// the in-memory accent untouched rather than snapping back to the default.
    pub fn reload(&mut self) -> AccentColor {
        if let Some(stored) = read_stored_accent(&self.storage) {
            if stored != self.current {
                debug!(from = %self.current, to = %stored, "Accent reloaded from storage");
                self.current = stored;
                self.notify(stored);
            }
        }
        self.current
    }

    /// Registers a callback invoked with the new accent after every change.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(AccentColor) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Borrows the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning the backing storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn notify(&mut self, accent: AccentColor) {
        for (_, listener) in &mut self.listeners {
            listener(accent);
        }
    }
}

/// Reads the stored accent, `None` when absent, unreadable or unrecognized.
fn read_stored_accent<S: PreferenceStorage>(storage: &S) -> Option<AccentColor> {
    match storage.read(ACCENT_STORAGE_KEY) {
        Ok(Some(raw)) => {
            let parsed = AccentColor::from_stored(&raw);
            if parsed.is_none() {
                warn!(value = %raw, "Ignoring unrecognized stored accent");
            }
            parsed
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Failed to read stored accent");
            None
        }
    }
}
