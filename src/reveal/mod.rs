//! Scroll-driven reveal tracking.
//!
//! Sections of the page register with a [`RevealTracker`]; the first time a
//! section scrolls into view its flag flips to visible and stays there for
//! the rest of the session, gating its entrance animation. Where the
//! notifications come from is abstracted behind [`ViewportObserver`].

pub mod manual;
pub mod observer;
pub mod tracker;
pub mod viewport;

pub use manual::ManualObserver;
pub use observer::{
    IntersectionEntry, IntersectionHandler, ObserverOptions, RootMargin, ViewportObserver,
    WatchTarget,
};
pub use tracker::{RevealRegion, RevealTracker};
pub use viewport::{Rect, ScrollViewport};
