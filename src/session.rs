//! Session startup glue.
//!
//! A [`Session`] is what the presentation layer holds for the lifetime of a
//! page view: the accent store, hydrated from storage, and the reveal
//! tracker, connected to the viewport observer. Both are owned here and only
//! handed out through their own operations.

use serde::Serialize;

use crate::constants::ANIMATED_SECTIONS;
use crate::models::{AccentColor, AccentPalette};
use crate::reveal::{RevealRegion, RevealTracker, ViewportObserver};
use crate::storage::PreferenceStorage;
use crate::theme::AccentStore;

/// Everything a render pass reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// Active accent
    pub accent: AccentColor,
    /// Tokens for the active accent
    pub palette: AccentPalette,
    /// Registered sections and their reveal flags
    pub sections: Vec<RevealRegion>,
}

/// Accent store and reveal tracker for one page view.
#[derive(Debug)]
pub struct Session<S: PreferenceStorage, O: ViewportObserver> {
    accent: AccentStore<S>,
    reveal: RevealTracker<O>,
}

impl<S: PreferenceStorage, O: ViewportObserver> Session<S, O> {
    /// Hydrates the accent and connects the observer.
    pub fn start(storage: S, observer: O, default_accent: AccentColor) -> Self {
        Self {
            accent: AccentStore::initialize_with_default(storage, default_accent),
            reveal: RevealTracker::new(observer),
        }
    }

    /// Registers the animated sections, looking each element up with `find`.
    ///
    /// Sections whose element cannot be found are registered unobserved.
    pub fn mount_sections<'e, F>(&mut self, mut find: F)
    where
        F: FnMut(&'static str) -> Option<&'e O::Element>,
        O::Element: 'e,
    {
        for id in ANIMATED_SECTIONS {
            self.reveal.register_region(id, find(id));
        }
    }

    /// Releases every section observation.
    pub fn unmount_sections(&mut self) {
        self.reveal.unregister_all();
    }

    /// The accent store.
    pub fn accent(&self) -> &AccentStore<S> {
        &self.accent
    }

    /// The accent store, for `set_accent` and listeners.
    pub fn accent_mut(&mut self) -> &mut AccentStore<S> {
        &mut self.accent
    }

    /// The reveal tracker.
    pub fn reveal(&self) -> &RevealTracker<O> {
        &self.reveal
    }

    /// The reveal tracker, for registration and driving the observer.
    pub fn reveal_mut(&mut self) -> &mut RevealTracker<O> {
        &mut self.reveal
    }

    /// Snapshot for a render pass.
    pub fn view(&self) -> SessionView {
        SessionView {
            accent: self.accent.current(),
            palette: self.accent.palette(),
            sections: self.reveal.regions(),
        }
    }
}
