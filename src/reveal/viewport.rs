//! Geometric viewport observer.
//!
//! [`ScrollViewport`] models a vertically scrolling page: elements are laid
//! out as rectangles in document coordinates, and moving the scroll offset
//! recomputes how much of each one sits inside the margin-adjusted viewport.
//! Notifications are only sent when an element crosses the threshold, plus
//! one initial report per observation, the way a browser's intersection
//! observer behaves.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::observer::{
    IntersectionEntry, IntersectionHandler, ObserverOptions, RootMargin, ViewportObserver,
    WatchTarget,
};

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width (never negative)
    pub width: f64,
    /// Height (never negative)
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle, clamping negative sizes to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Overlap with `other`.
    ///
    /// Edge-adjacent rectangles intersect with zero area; disjoint ones
    /// return `None`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    /// Grows (or with negative values shrinks) each edge by `margin`.
    #[must_use]
    pub fn expand(&self, margin: &RootMargin) -> Self {
        Self::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

#[derive(Debug)]
struct Watch {
    rect: Rect,
    /// Whether the last delivered entry met the threshold; `None` until the
    /// initial report has gone out.
    reported: Option<bool>,
}

/// A scrolling viewport that observes element rectangles.
pub struct ScrollViewport {
    width: f64,
    height: f64,
    scroll_y: f64,
    options: ObserverOptions,
    handler: Option<IntersectionHandler>,
    watches: BTreeMap<WatchTarget, Watch>,
}

impl fmt::Debug for ScrollViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollViewport")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scroll_y", &self.scroll_y)
            .field("watches", &self.watches)
            .finish_non_exhaustive()
    }
}

impl ScrollViewport {
    /// Creates a viewport of the given size scrolled to the top.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            scroll_y: 0.0,
            options: ObserverOptions::default(),
            handler: None,
            watches: BTreeMap::new(),
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Visible area in document coordinates, before the root margin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// Number of live observations.
    #[must_use]
    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    /// Scrolls to `offset` (clamped at zero) and delivers any changes.
    ///
    /// Returns the number of entries delivered.
    pub fn scroll_to(&mut self, offset: f64) -> usize {
        self.scroll_y = offset.max(0.0);
        self.flush()
    }

    /// Resizes the viewport and delivers any changes.
    pub fn resize(&mut self, width: f64, height: f64) -> usize {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.flush()
    }

    /// Computes the entry `rect` would get at the current scroll offset.
    #[must_use]
    pub fn measure(&self, target: WatchTarget, rect: &Rect) -> IntersectionEntry {
        let root = self.bounds().expand(&self.options.root_margin);

        match rect.intersection(&root) {
            Some(overlap) => {
                let area = rect.area();
                let ratio = if area > 0.0 {
                    (overlap.area() / area).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                IntersectionEntry {
                    target,
                    is_intersecting: true,
                    intersection_ratio: ratio,
                }
            }
            None => IntersectionEntry::left(target),
        }
    }

    /// Delivers initial reports and threshold crossings since the last flush.
    ///
    /// Returns the number of entries delivered.
    pub fn flush(&mut self) -> usize {
        let threshold = self.options.threshold;
        let mut batch = Vec::new();

        let measured: Vec<(WatchTarget, IntersectionEntry)> = self
            .watches
            .iter()
            .map(|(target, watch)| (*target, self.measure(*target, &watch.rect)))
            .collect();

        for (target, entry) in measured {
            let reached = entry.reaches(threshold);
            if let Some(watch) = self.watches.get_mut(&target) {
                if watch.reported != Some(reached) {
                    watch.reported = Some(reached);
                    batch.push(entry);
                }
            }
        }

        if batch.is_empty() {
            return 0;
        }
        if let Some(handler) = self.handler.as_mut() {
            handler(&batch);
        }
        batch.len()
    }
}

impl ViewportObserver for ScrollViewport {
    type Element = Rect;

    fn connect(&mut self, options: ObserverOptions, handler: IntersectionHandler) -> Result<()> {
        if self.handler.is_some() {
            anyhow::bail!("Viewport is already connected");
        }
        if !(0.0..=1.0).contains(&options.threshold) {
            anyhow::bail!(
                "Threshold must be between 0.0 and 1.0, got {}",
                options.threshold
            );
        }
        self.options = options;
        self.handler = Some(handler);
        Ok(())
    }

    fn observe(&mut self, target: WatchTarget, element: &Rect) -> Result<()> {
        self.watches.insert(
            target,
            Watch {
                rect: *element,
                reported: None,
            },
        );
        Ok(())
    }

    fn unobserve(&mut self, target: WatchTarget) {
        self.watches.remove(&target);
    }

    fn disconnect(&mut self) {
        self.handler = None;
        self.watches.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn connected(height: f64) -> (ScrollViewport, Rc<RefCell<Vec<IntersectionEntry>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut viewport = ScrollViewport::new(1280.0, height);
        viewport
            .connect(
                ObserverOptions::default(),
                Box::new(move |entries| sink.borrow_mut().extend_from_slice(entries)),
            )
            .unwrap();
        (viewport, seen)
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        let adjacent = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection(&adjacent).map(|r| r.area()), Some(0.0));

        let far = Rect::new(500.0, 500.0, 10.0, 10.0);
        assert_eq!(a.intersection(&far), None);
    }

    #[test]
    fn test_negative_bottom_margin_shrinks_root() {
        let root = Rect::new(0.0, 0.0, 800.0, 600.0).expand(&RootMargin::bottom(-50.0));
        assert!((root.bottom() - 550.0).abs() < f64::EPSILON);
        assert!(root.y.abs() < f64::EPSILON);
    }

    #[test]
    fn test_initial_report_on_flush() {
        let (mut viewport, seen) = connected(600.0);
        viewport
            .observe(WatchTarget::new(1), &Rect::new(0.0, 100.0, 1280.0, 200.0))
            .unwrap();
        viewport
            .observe(WatchTarget::new(2), &Rect::new(0.0, 2000.0, 1280.0, 200.0))
            .unwrap();

        assert_eq!(viewport.flush(), 2);
        let seen = seen.borrow();
        assert!(seen[0].reaches(0.1));
        assert!(!seen[1].is_intersecting);
    }

    #[test]
    fn test_only_threshold_crossings_are_reported() {
        let (mut viewport, seen) = connected(600.0);
        // 400px tall section starting at y=1000
        viewport
            .observe(WatchTarget::new(1), &Rect::new(0.0, 1000.0, 1280.0, 400.0))
            .unwrap();
        assert_eq!(viewport.flush(), 1);

        // Trigger line at scroll + 550; 40px visible is exactly 10%
        assert_eq!(viewport.scroll_to(480.0), 0);
        assert_eq!(viewport.scroll_to(490.0), 1);
        assert!(seen.borrow().last().unwrap().reaches(0.1));

        // Still in view, no new crossing
        assert_eq!(viewport.scroll_to(700.0), 0);

        // Scrolled past entirely
        assert_eq!(viewport.scroll_to(3000.0), 1);
        assert!(!seen.borrow().last().unwrap().is_intersecting);
    }

    #[test]
    fn test_zero_area_element_counts_as_fully_visible() {
        let viewport = ScrollViewport::new(800.0, 600.0);
        let entry = viewport.measure(WatchTarget::new(1), &Rect::new(0.0, 10.0, 0.0, 0.0));
        assert!(entry.is_intersecting);
        assert!((entry.intersection_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut viewport = ScrollViewport::new(800.0, 600.0);
        let options = ObserverOptions {
            threshold: 1.5,
            ..ObserverOptions::default()
        };
        assert!(viewport.connect(options, Box::new(|_| {})).is_err());
    }

    #[test]
    fn test_unobserve_and_disconnect() {
        let (mut viewport, _seen) = connected(600.0);
        viewport
            .observe(WatchTarget::new(1), &Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        viewport.unobserve(WatchTarget::new(1));
        assert_eq!(viewport.watch_count(), 0);

        viewport
            .observe(WatchTarget::new(2), &Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        viewport.disconnect();
        assert_eq!(viewport.watch_count(), 0);
        assert_eq!(viewport.flush(), 0);
    }
}
