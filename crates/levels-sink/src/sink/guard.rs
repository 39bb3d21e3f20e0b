//! crates/levels-sink/src/sink/guard.rs

use levels::StepTracker;

/// RAII guard marking a stamped emit as in flight on a [`StepTracker`].
///
/// Instances are created by [`ActiveLevelGuard::new`]; while the guard is
/// alive, `is_level_active()` reports `true` so a redirection collaborator
/// inspecting the tracker mid-write can distinguish levelled calls from
/// plain output. Dropping the guard clears the marker even when rendering
/// fails partway. The guard implements [`Deref`](std::ops::Deref) and
/// [`DerefMut`](std::ops::DerefMut) so callers can stamp and query through
/// it without extra boilerplate.
#[must_use = "dropping the guard immediately clears the in-flight marker"]
pub struct ActiveLevelGuard<'a> {
    tracker: &'a mut StepTracker,
}

impl<'a> ActiveLevelGuard<'a> {
    /// Marks the tracker's emit as in flight until the guard drops.
    pub fn new(tracker: &'a mut StepTracker) -> Self {
        tracker.begin_emit();
        Self { tracker }
    }
}

impl Drop for ActiveLevelGuard<'_> {
    fn drop(&mut self) {
        self.tracker.end_emit();
    }
}

impl std::ops::Deref for ActiveLevelGuard<'_> {
    type Target = StepTracker;

    fn deref(&self) -> &Self::Target {
        self.tracker
    }
}

impl std::ops::DerefMut for ActiveLevelGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tracker
    }
}
