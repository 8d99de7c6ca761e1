//! Reveal tracker scenarios with scripted and geometric observers.

use folio::constants::ANIMATED_SECTIONS;
use folio::models::AccentColor;
use folio::reveal::{IntersectionEntry, ManualObserver, Rect, RevealTracker, ScrollViewport};
use folio::session::Session;
use folio::storage::MemoryStorage;

fn manual_tracker() -> (RevealTracker<ManualObserver>, ManualObserver) {
    let observer = ManualObserver::new();
    (RevealTracker::new(observer.clone()), observer)
}

// ============================================================================
// One-shot Reveal
// ============================================================================

#[test]
fn test_enter_leave_enter_stays_visible() {
    let (mut tracker, observer) = manual_tracker();
    tracker.register_region("skills", Some("skills"));
    assert!(!tracker.is_visible("skills"));

    observer.enter("skills");
    assert!(tracker.is_visible("skills"));

    observer.leave("skills");
    assert!(tracker.is_visible("skills"));

    observer.enter("skills");
    assert!(tracker.is_visible("skills"));
}

#[test]
fn test_batch_reveals_only_intersecting_regions() {
    let (mut tracker, observer) = manual_tracker();
    for id in ["skills", "resume", "contact"] {
        tracker.register_region(id, Some(id));
    }

    observer.emit([("resume", true), ("skills", false), ("contact", false)]);

    assert!(tracker.is_visible("resume"));
    assert!(!tracker.is_visible("skills"));
    assert!(!tracker.is_visible("contact"));
}

#[test]
fn test_batch_order_does_not_matter() {
    let (mut forward, forward_observer) = manual_tracker();
    let (mut backward, backward_observer) = manual_tracker();
    for id in ANIMATED_SECTIONS {
        forward.register_region(id, Some(id));
        backward.register_region(id, Some(id));
    }

    forward_observer.emit([("skills", true), ("contact", true), ("contact", false)]);
    backward_observer.emit([("contact", false), ("contact", true), ("skills", true)]);

    assert_eq!(forward.regions(), backward.regions());
}

// ============================================================================
// Unknown Regions and Lifecycle
// ============================================================================

#[test]
fn test_unknown_region_is_safe() {
    let (mut tracker, _observer) = manual_tracker();
    assert!(!tracker.is_visible("nonexistent"));
    assert!(!tracker.unregister_region("nonexistent"));
    assert!(!tracker.is_visible("nonexistent"));
}

#[test]
fn test_unregister_twice_is_noop() {
    let (mut tracker, observer) = manual_tracker();
    tracker.register_region("contact", Some("contact"));
    assert!(tracker.unregister_region("contact"));
    assert!(!tracker.unregister_region("contact"));
    assert_eq!(observer.observed_count(), 0);
}

#[test]
fn test_entries_after_unregister_are_ignored() {
    let (mut tracker, observer) = manual_tracker();
    tracker.register_region("resume", Some("resume"));
    let target = observer.target_of("resume").unwrap();

    tracker.unregister_region("resume");
    observer.emit_entries(&[IntersectionEntry::entered(target)]);

    assert!(!tracker.is_visible("resume"));
    assert!(!tracker.is_registered("resume"));
}

#[test]
fn test_connect_receives_default_options() {
    let (_tracker, observer) = manual_tracker();
    let options = observer.options().expect("observer should be connected");
    assert!((options.threshold - 0.1).abs() < f64::EPSILON);
    assert!((options.root_margin.bottom + 50.0).abs() < f64::EPSILON);
}

#[test]
fn test_unsupported_observer_reveals_everything() {
    let mut tracker = RevealTracker::new(ManualObserver::unsupported());
    for id in ANIMATED_SECTIONS {
        tracker.register_region(id, Some(id));
    }
    assert!(ANIMATED_SECTIONS.iter().all(|id| tracker.is_visible(id)));
}

#[test]
fn test_observer_failing_to_connect_reveals_everything() {
    let mut tracker = RevealTracker::new(ManualObserver::failing_connect());
    assert!(tracker.is_fail_open());

    for id in ANIMATED_SECTIONS {
        tracker.register_region(id, Some(id));
    }
    tracker.register_region("extra", None);

    assert!(ANIMATED_SECTIONS.iter().all(|id| tracker.is_visible(id)));
    assert!(tracker.is_visible("extra"));
}

// ============================================================================
// Geometric Viewport
// ============================================================================

/// Page with sections stacked below an 800px hero.
fn page_tracker() -> RevealTracker<ScrollViewport> {
    let mut tracker = RevealTracker::new(ScrollViewport::new(1280.0, 800.0));
    let layout = [
        ("skills", Rect::new(0.0, 1400.0, 1280.0, 600.0)),
        ("resume", Rect::new(0.0, 2000.0, 1280.0, 500.0)),
        ("contact", Rect::new(0.0, 2500.0, 1280.0, 400.0)),
    ];
    for (id, rect) in &layout {
        tracker.register_region(*id, Some(rect));
    }
    tracker.observer_mut().flush();
    tracker
}

#[test]
fn test_nothing_revealed_at_top_of_page() {
    let tracker = page_tracker();
    assert!(ANIMATED_SECTIONS.iter().all(|id| !tracker.is_visible(id)));
}

#[test]
fn test_root_margin_delays_reveal() {
    let mut tracker = page_tracker();

    // Trigger line sits at scroll + 750; skills needs 60px (10%) past it
    tracker.observer_mut().scroll_to(700.0);
    assert!(!tracker.is_visible("skills"));

    tracker.observer_mut().scroll_to(705.0);
    assert!(!tracker.is_visible("skills"));

    tracker.observer_mut().scroll_to(710.0);
    assert!(tracker.is_visible("skills"));
    assert!(!tracker.is_visible("resume"));
}

#[test]
fn test_scrolling_back_up_keeps_sections_revealed() {
    let mut tracker = page_tracker();

    for offset in [800.0, 1400.0, 2400.0] {
        tracker.observer_mut().scroll_to(offset);
    }
    assert!(ANIMATED_SECTIONS.iter().all(|id| tracker.is_visible(id)));

    tracker.observer_mut().scroll_to(0.0);
    assert!(ANIMATED_SECTIONS.iter().all(|id| tracker.is_visible(id)));
}

#[test]
fn test_jump_scroll_reveals_only_sections_in_view() {
    let mut tracker = page_tracker();

    // Skills is already above the viewport when the jump lands
    tracker.observer_mut().scroll_to(2400.0);
    assert!(tracker.is_visible("contact"));
    assert!(tracker.is_visible("resume"));
    assert!(!tracker.is_visible("skills"));
}

#[test]
fn test_unregister_releases_viewport_watches() {
    let mut tracker = page_tracker();
    assert_eq!(tracker.observer().watch_count(), 3);
    tracker.unregister_region("skills");
    assert_eq!(tracker.observer().watch_count(), 2);
    tracker.unregister_all();
    assert_eq!(tracker.observer().watch_count(), 0);
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_scenario() {
    let observer = ManualObserver::new();
    let mut session = Session::start(MemoryStorage::new(), observer.clone(), AccentColor::Orange);
    session.mount_sections(Some);

    assert_eq!(session.view().accent, AccentColor::Orange);

    session.accent_mut().set_accent(AccentColor::Cyan);
    observer.emit([("resume", true)]);

    let view = session.view();
    assert_eq!(view.accent, AccentColor::Cyan);
    assert_eq!(view.palette.accent, AccentColor::Cyan);
    let visible: Vec<&str> = view
        .sections
        .iter()
        .filter(|s| s.visible)
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(visible, ["resume"]);

    drop(session);
    assert!(!observer.is_connected());
    assert_eq!(observer.observed_count(), 0);
}
