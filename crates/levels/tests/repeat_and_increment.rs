//! Integration tests for the repeat and relative-increment request shapes.
//!
//! An omitted level is a valid "repeat" request, not a missing argument:
//! the previous message's level is reused and its step still advances.
//! Increments move relative to the current level before clamping.

use levels::{LevelBounds, LevelRequest, StepTracker};

/// A bare repeat immediately after an explicit stamp reuses that level and
/// advances its step.
#[test]
fn repeat_after_explicit_advances_same_level() {
    let mut tracker = StepTracker::default();
    tracker.stamp(LevelRequest::Explicit(3));

    let label = tracker.stamp(LevelRequest::Repeat);
    assert_eq!(label.level, 3);
    assert_eq!(label.step, 2);
}

/// Repeating from the initial state stamps the lowest valid level.
#[test]
fn repeat_before_any_stamp_uses_the_lowest_level() {
    let mut tracker = StepTracker::default();
    let label = tracker.stamp(LevelRequest::Repeat);
    assert_eq!(label.to_string(), "1-1");
}

/// Repeat and increment-by-zero are the same request: both re-stamp the
/// current level rather than leaving its step untouched.
#[test]
fn repeat_equals_increment_by_zero() {
    let mut a = StepTracker::default();
    let mut b = StepTracker::default();
    a.stamp(LevelRequest::Explicit(2));
    b.stamp(LevelRequest::Explicit(2));

    assert_eq!(
        a.stamp(LevelRequest::Repeat),
        b.stamp(LevelRequest::Increment(0)),
    );
}

/// An increment of 2 from level 1 resolves to level 3.
#[test]
fn increment_by_two_skips_a_level() {
    let mut tracker = StepTracker::default();
    tracker.stamp(LevelRequest::Explicit(1));

    let label = tracker.stamp(LevelRequest::Increment(2));
    assert_eq!(label.level, 3);
    assert_eq!(label.step, 1);
}

/// Negative increments move back toward the top level and reset what they
/// pass over.
#[test]
fn negative_increment_moves_outward_and_resets() {
    let mut tracker = StepTracker::default();
    tracker.stamp(LevelRequest::Explicit(4));
    tracker.stamp(LevelRequest::Explicit(4));

    let label = tracker.stamp(LevelRequest::Increment(-2));
    assert_eq!(label.level, 2);
    assert_eq!(label.step, 1);
    assert_eq!(tracker.current_label(4).step, 0);
}

/// The conversion from the optional-level calling convention matches the
/// request shapes.
#[test]
fn optional_level_convention_maps_to_requests() {
    let mut tracker = StepTracker::new(LevelBounds::default());
    tracker.stamp(LevelRequest::from(Some(2)));
    let label = tracker.stamp(LevelRequest::from(None));
    assert_eq!(label.to_string(), "2-2");
}
