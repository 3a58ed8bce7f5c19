//! Assertion utilities for robot testing

use crate::recording::RecordingSurface;
use pullrefresh_core::{PullRefresh, PullStatus};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the widget and its surface are back at rest.
pub fn assert_settled_idle(widget: &PullRefresh, surface: &RecordingSurface) {
    assert_eq!(widget.status(), PullStatus::Idle, "status should be idle");
    assert_eq!(widget.distance(), 0.0, "distance should be zero");
    assert!(!widget.haptic_fired(), "haptic flag should be cleared");
    assert!(!widget.is_tracking(), "no gesture should be tracked");
    assert!(!widget.is_releasing(), "no release should be running");
    assert_eq!(surface.container_translation(), 0.0, "container translation");
    assert_eq!(surface.clip_bottom(), 0.0, "container clip");
    assert_eq!(surface.indicator_translation(), 0.0, "indicator translation");
    assert!(!surface.indicator_visible(), "indicator should be hidden");
}
