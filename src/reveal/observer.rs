//! The injectable viewport observation mechanism.
//!
//! A [`ViewportObserver`] watches elements on behalf of the reveal tracker
//! and reports visibility changes in batches through a single handler. In a
//! browser this is an `IntersectionObserver`; [`ManualObserver`] lets a host
//! (or a test) push notifications itself, and [`ScrollViewport`] computes
//! them from element rectangles.
//!
//! [`ManualObserver`]: super::ManualObserver
//! [`ScrollViewport`]: super::ScrollViewport

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use crate::constants::{REVEAL_ROOT_MARGIN_BOTTOM, REVEAL_THRESHOLD};

/// Opaque token identifying one observation.
///
/// Every registration gets a fresh target, so notifications for a released
/// observation can be told apart from the registration that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WatchTarget(u64);

impl WatchTarget {
    /// Creates a target from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Offsets applied to the viewport before intersecting, in pixels.
///
/// Positive values grow the viewport, negative values shrink it, matching
/// CSS margin semantics for `rootMargin`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RootMargin {
    /// Top edge offset
    pub top: f64,
    /// Right edge offset
    pub right: f64,
    /// Bottom edge offset
    pub bottom: f64,
    /// Left edge offset
    pub left: f64,
}

impl RootMargin {
    /// Margin that only moves the bottom edge.
    #[must_use]
    pub const fn bottom(bottom: f64) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom,
            left: 0.0,
        }
    }
}

/// Trigger configuration handed to the observer when it is connected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverOptions {
    /// Visible fraction of the element (0.0-1.0) required to count as revealed
    pub threshold: f64,
    /// Adjustment applied to the viewport bounds
    pub root_margin: RootMargin,
}

impl Default for ObserverOptions {
    /// 10% visible, with the trigger line 50px above the bottom of the viewport.
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: RootMargin::bottom(REVEAL_ROOT_MARGIN_BOTTOM),
        }
    }
}

/// One visibility change reported by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntersectionEntry {
    /// Observation this entry belongs to
    pub target: WatchTarget,
    /// Whether the element currently overlaps the (margin-adjusted) viewport
    pub is_intersecting: bool,
    /// Visible fraction of the element, 0.0-1.0
    pub intersection_ratio: f64,
}

impl IntersectionEntry {
    /// Entry for an element that is fully in view.
    #[must_use]
    pub const fn entered(target: WatchTarget) -> Self {
        Self {
            target,
            is_intersecting: true,
            intersection_ratio: 1.0,
        }
    }

    /// Entry for an element that left the view.
    #[must_use]
    pub const fn left(target: WatchTarget) -> Self {
        Self {
            target,
            is_intersecting: false,
            intersection_ratio: 0.0,
        }
    }

    /// Whether this entry meets `threshold`.
    #[must_use]
    pub fn reaches(&self, threshold: f64) -> bool {
        self.is_intersecting && self.intersection_ratio >= threshold
    }
}

/// Callback receiving batches of intersection entries.
///
/// Entries within a batch, and batches themselves, carry no ordering
/// guarantee across targets.
pub type IntersectionHandler = Box<dyn FnMut(&[IntersectionEntry])>;

/// Source of viewport intersection notifications.
pub trait ViewportObserver {
    /// Handle type for the things being observed.
    type Element: ?Sized;

    /// Whether the mechanism exists in this environment.
    ///
    /// When false the tracker never calls any other method and treats every
    /// region as visible.
    fn is_supported(&self) -> bool {
        true
    }

    /// Installs the batch handler and trigger configuration.
    ///
    /// Called once, before any `observe`.
    fn connect(&mut self, options: ObserverOptions, handler: IntersectionHandler) -> Result<()>;

    /// Starts watching `element`, reporting under `target`.
    fn observe(&mut self, target: WatchTarget, element: &Self::Element) -> Result<()>;

    /// Stops watching `target` and releases whatever backs it.
    ///
    /// Unknown targets are ignored.
    fn unobserve(&mut self, target: WatchTarget);

    /// Drops the handler and every remaining observation.
    fn disconnect(&mut self);
}
