//! crates/levels/src/thread_local.rs
//! Per-thread tracker state and stamped event collection.
//!
//! The counter has no synchronization of its own, so each thread owns an
//! independent [`StepTracker`]. A test worker initializes its tracker once,
//! stamps messages through the free functions below, and drains the labelled
//! events when the run (or a phase of it) completes.

use std::cell::RefCell;

use super::bounds::LevelBounds;
use super::request::LevelRequest;
use super::tracker::{StepLabel, StepTracker};

thread_local! {
    static TRACKER: RefCell<StepTracker> = RefCell::new(StepTracker::default());
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<Vec<StepEvent>> = RefCell::new(Vec::new());
}

/// A message stamped with its level-step label.
#[derive(Clone, Debug)]
pub struct StepEvent {
    /// The label attached when the message was stamped.
    pub label: StepLabel,
    /// The message text.
    pub message: String,
}

impl StepEvent {
    /// Renders the event the way a flat log prints it: `"level-step message"`.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{} {}", self.label, self.message)
    }
}

/// Replaces the current thread's tracker with a fresh one over `bounds`.
///
/// Also discards any events collected so far on this thread.
pub fn init(bounds: LevelBounds) {
    TRACKER.with(|t| {
        *t.borrow_mut() = StepTracker::new(bounds);
    });
    EVENTS.with(|e| e.borrow_mut().clear());
}

/// Stamps a message at the highest level (a top-level phase).
pub fn high_level_step(message: impl Into<String>) -> StepLabel {
    record(LevelRequest::Explicit(1), message.into())
}

/// Stamps a message at the second highest level (a sub-step).
pub fn detail_step(message: impl Into<String>) -> StepLabel {
    record(LevelRequest::Explicit(2), message.into())
}

/// Stamps a message at the given level, or repeats the previous level when
/// `level` is `None`.
pub fn step(message: impl Into<String>, level: Option<i32>) -> StepLabel {
    record(LevelRequest::from(level), message.into())
}

/// Moves the current level by `by` and stamps the message at the new level.
pub fn step_increment(message: impl Into<String>, by: i32) -> StepLabel {
    record(LevelRequest::Increment(by), message.into())
}

/// Drains all events collected on this thread, clearing the buffer.
#[must_use]
pub fn drain_events() -> Vec<StepEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// Runs `f` with mutable access to this thread's tracker.
///
/// This is the polling surface for redirection collaborators that need to
/// inspect `is_level_active`/`current_level` or stamp unlabelled output via
/// `next_label`.
pub fn with_tracker<R>(f: impl FnOnce(&mut StepTracker) -> R) -> R {
    TRACKER.with(|t| f(&mut t.borrow_mut()))
}

fn record(request: LevelRequest, message: String) -> StepLabel {
    let label = TRACKER.with(|t| {
        let mut tracker = t.borrow_mut();
        tracker.begin_emit();
        let label = tracker.stamp(request);
        tracker.end_emit();
        label
    });
    EVENTS.with(|e| e.borrow_mut().push(StepEvent { label, message }));
    label
}
