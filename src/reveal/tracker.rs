//! One-shot reveal flags for named page regions.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use super::observer::{IntersectionEntry, ObserverOptions, ViewportObserver, WatchTarget};

/// Snapshot of one registered region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealRegion {
    /// Stable region identifier
    pub id: String,
    /// Whether the region has entered the viewport at least once
    pub visible: bool,
}

#[derive(Debug)]
struct Region {
    target: Option<WatchTarget>,
    visible: bool,
}

/// Region flags shared between the tracker and the observer's handler.
#[derive(Debug)]
struct RegionTable {
    regions: HashMap<String, Region>,
    targets: HashMap<WatchTarget, String>,
    threshold: f64,
}

impl RegionTable {
    fn apply(&mut self, entries: &[IntersectionEntry]) {
        for entry in entries {
            // Leaving the viewport never hides a region again
            if !entry.reaches(self.threshold) {
                continue;
            }

            let Some(id) = self.targets.get(&entry.target) else {
                debug!(watch = %entry.target, "Ignoring entry for released observation");
                continue;
            };

            if let Some(region) = self.regions.get_mut(id) {
                if !region.visible {
                    region.visible = true;
                    debug!(region = %id, ratio = entry.intersection_ratio, "Region revealed");
                }
            }
        }
    }

    /// Removes a region and its target mapping.
    fn remove(&mut self, id: &str) -> Option<Region> {
        let region = self.regions.remove(id)?;
        if let Some(target) = region.target {
            self.targets.remove(&target);
        }
        Some(region)
    }
}

/// Turns "scrolled into view" into a per-region flag that only ever goes
/// from hidden to visible.
///
/// The tracker owns its observer. Every observation it starts is released on
/// [`unregister_region`](Self::unregister_region),
/// [`unregister_all`](Self::unregister_all), re-registration of the same id,
/// or when the tracker is dropped.
///
/// If the observer is unsupported or fails to connect, the tracker fails
/// open: every region is visible as soon as it is registered.
pub struct RevealTracker<O: ViewportObserver> {
    observer: O,
    table: Rc<RefCell<RegionTable>>,
    options: ObserverOptions,
    connected: bool,
    next_target: u64,
}

impl<O: ViewportObserver> fmt::Debug for RevealTracker<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealTracker")
            .field("options", &self.options)
            .field("connected", &self.connected)
            .field("regions", &self.table.borrow().regions)
            .finish_non_exhaustive()
    }
}

impl<O: ViewportObserver> RevealTracker<O> {
    /// Creates a tracker with the default threshold and root margin.
    pub fn new(observer: O) -> Self {
        Self::with_options(observer, ObserverOptions::default())
    }

    /// Creates a tracker and connects `observer` with `options`.
    pub fn with_options(mut observer: O, options: ObserverOptions) -> Self {
        let table = Rc::new(RefCell::new(RegionTable {
            regions: HashMap::new(),
            targets: HashMap::new(),
            threshold: options.threshold,
        }));

        let connected = if observer.is_supported() {
            let weak: Weak<RefCell<RegionTable>> = Rc::downgrade(&table);
            let handler = Box::new(move |entries: &[IntersectionEntry]| {
                if let Some(table) = weak.upgrade() {
                    table.borrow_mut().apply(entries);
                }
            });

            match observer.connect(options, handler) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Viewport observer failed to connect; revealing all regions");
                    false
                }
            }
        } else {
            warn!("Viewport observer unavailable; revealing all regions");
            false
        };

        Self {
            observer,
            table,
            options,
            connected,
            next_target: 1,
        }
    }

    /// Registers a region and starts observing its element.
    ///
    /// Re-registering an id replaces the previous registration and releases
    /// its observation. A missing element registers the region without
    /// observing anything, so it stays hidden until registered again.
    pub fn register_region(&mut self, id: impl Into<String>, element: Option<&O::Element>) {
        let id = id.into();
        self.unregister_region(&id);

        if !self.connected {
            self.insert(&id, None, true);
            return;
        }

        let Some(element) = element else {
            debug!(region = %id, "Region registered without an element; not observing");
            self.insert(&id, None, false);
            return;
        };

        let target = WatchTarget::new(self.next_target);
        self.next_target += 1;

        // Mapped before observing: some observers report synchronously
        self.insert(&id, Some(target), false);

        match self.observer.observe(target, element) {
            Ok(()) => debug!(region = %id, watch = %target, "Observing region"),
            Err(e) => {
                warn!(region = %id, error = %e, "Failed to observe region; revealing it");
                let mut table = self.table.borrow_mut();
                table.targets.remove(&target);
                if let Some(region) = table.regions.get_mut(&id) {
                    region.target = None;
                    region.visible = true;
                }
            }
        }
    }

    /// Stops observing a region and forgets it.
    ///
    /// Returns false, and does nothing, for ids that are not registered.
    pub fn unregister_region(&mut self, id: &str) -> bool {
        let removed = self.table.borrow_mut().remove(id);
        match removed {
            Some(region) => {
                if let Some(target) = region.target {
                    self.observer.unobserve(target);
                }
                debug!(region = %id, "Region released");
                true
            }
            None => false,
        }
    }

    /// Releases every registered region.
    pub fn unregister_all(&mut self) {
        let targets: Vec<WatchTarget> = {
            let mut table = self.table.borrow_mut();
            table.targets.clear();
            table
                .regions
                .drain()
                .filter_map(|(_, region)| region.target)
                .collect()
        };

        for target in targets {
            self.observer.unobserve(target);
        }
    }

    /// Whether `id` has been revealed. Unknown ids are not visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.table
            .borrow()
            .regions
            .get(id)
            .is_some_and(|region| region.visible)
    }

    /// Whether `id` is currently registered.
    pub fn is_registered(&self, id: &str) -> bool {
        self.table.borrow().regions.contains_key(id)
    }

    /// Snapshot of all registered regions, sorted by id.
    pub fn regions(&self) -> Vec<RevealRegion> {
        let table = self.table.borrow();
        let mut regions: Vec<RevealRegion> = table
            .regions
            .iter()
            .map(|(id, region)| RevealRegion {
                id: id.clone(),
                visible: region.visible,
            })
            .collect();
        regions.sort_by(|a, b| a.id.cmp(&b.id));
        regions
    }

    /// True when the observer is unavailable and everything is shown.
    pub fn is_fail_open(&self) -> bool {
        !self.connected
    }

    /// Trigger configuration in use.
    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Borrows the observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutably borrows the observer, e.g. to drive a scroll.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn insert(&self, id: &str, target: Option<WatchTarget>, visible: bool) {
        let mut table = self.table.borrow_mut();
        if let Some(target) = target {
            table.targets.insert(target, id.to_string());
        }
        table
            .regions
            .insert(id.to_string(), Region { target, visible });
    }
}

impl<O: ViewportObserver> Drop for RevealTracker<O> {
    fn drop(&mut self) {
        self.unregister_all();
        if self.connected {
            self.observer.disconnect();
        }
    }
}
