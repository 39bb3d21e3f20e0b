//! crates/levels/src/tracker.rs
//! The level/step counter state machine.

use std::fmt;

use super::bounds::LevelBounds;
use super::request::LevelRequest;

/// The `(level, step)` pair attached to a stamped message, plus the global
/// sequence index correlating it with intercepted output.
///
/// Displays as `"{level}-{step}"`, the prefix readers use to reconstruct
/// nesting from a flat log.
///
/// # Examples
///
/// ```
/// use levels::StepTracker;
///
/// let mut tracker = StepTracker::default();
/// let label = tracker.advance(2);
/// assert_eq!(label.to_string(), "2-1");
/// assert_eq!(label.sequence, 1);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepLabel {
    /// Resolved nesting level; lower is coarser.
    pub level: u8,
    /// Per-level sequence number, reset whenever a shallower-or-equal level
    /// is stamped.
    pub step: u32,
    /// Monotonically increasing counter across all levels.
    pub sequence: u64,
}

impl fmt::Display for StepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.level, self.step)
    }
}

/// Counter state machine assigning level-step labels to a single stream of
/// messages.
///
/// One instance tracks one logical stream; parallel workers each own an
/// independent tracker (the per-thread layer in
/// [`thread_local`](crate::thread_local) does exactly that). Every operation
/// is a synchronous, non-blocking mutation with no suspension points.
///
/// All level inputs are total: out-of-range requests are saturated into the
/// configured [`LevelBounds`] rather than rejected. This permissiveness is
/// deliberate; stamping must never fail, because expected test-log output
/// depends on every message receiving a label.
///
/// # Invariants
///
/// - `bounds.min() < current_level <= bounds.max()` at all times.
/// - Every step counter above the most recently stamped level is zero until
///   that level is next stamped.
/// - Step counters are dense per level: 1, 2, …, n between resets, with no
///   value skipped or reused.
///
/// # Examples
///
/// ```
/// use levels::{LevelRequest, StepTracker};
///
/// let mut tracker = StepTracker::default();
/// assert_eq!(tracker.stamp(LevelRequest::Explicit(1)).to_string(), "1-1");
/// assert_eq!(tracker.stamp(LevelRequest::Explicit(2)).to_string(), "2-1");
/// assert_eq!(tracker.stamp(LevelRequest::Repeat).to_string(), "2-2");
/// // Stamping level 1 again resets the level-2 counter.
/// assert_eq!(tracker.stamp(LevelRequest::Explicit(1)).to_string(), "1-2");
/// assert_eq!(tracker.stamp(LevelRequest::Explicit(2)).to_string(), "2-1");
/// ```
#[derive(Clone, Debug)]
pub struct StepTracker {
    bounds: LevelBounds,
    current_level: u8,
    steps: Vec<u32>,
    sequence: u64,
    level_active: bool,
}

impl StepTracker {
    /// Creates a tracker over the given level range.
    ///
    /// The current level starts at the lowest valid level and every step
    /// counter starts at zero, so the first stamp of any level yields step 1.
    #[must_use]
    pub fn new(bounds: LevelBounds) -> Self {
        Self {
            bounds,
            current_level: bounds.min() + 1,
            steps: vec![0; bounds.slot_count()],
            sequence: 0,
            level_active: false,
        }
    }

    /// The level range this tracker clamps into.
    #[must_use]
    pub const fn bounds(&self) -> LevelBounds {
        self.bounds
    }

    /// The most recently resolved level.
    #[must_use]
    pub const fn current_level(&self) -> u8 {
        self.current_level
    }

    /// The global sequence index of the most recent stamp.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// True only while a stamped emit is in flight.
    ///
    /// A redirection collaborator inspecting the tracker mid-write uses this
    /// to distinguish levelled calls from plain, unlabelled output.
    #[must_use]
    pub const fn is_level_active(&self) -> bool {
        self.level_active
    }

    /// Marks a stamped emit as in flight until [`end_emit`](Self::end_emit).
    pub fn begin_emit(&mut self) {
        self.level_active = true;
    }

    /// Clears the in-flight marker set by [`begin_emit`](Self::begin_emit).
    pub fn end_emit(&mut self) {
        self.level_active = false;
    }

    /// Clamps `requested`, stores it as the current level, and returns it.
    ///
    /// Does not advance any step counter.
    pub fn set_level(&mut self, requested: i32) -> u8 {
        self.current_level = self.bounds.clamp(requested);
        self.current_level
    }

    /// Moves the current level by `by` (negative moves outward), clamped.
    ///
    /// Does not advance any step counter.
    pub fn increment_level(&mut self, by: i32) -> u8 {
        self.set_level(i32::from(self.current_level).saturating_add(by))
    }

    /// Reduces a request shape to a clamped level and stores it as current.
    pub fn resolve(&mut self, request: LevelRequest) -> u8 {
        match request {
            LevelRequest::Explicit(level) => self.set_level(level),
            LevelRequest::Repeat => self.current_level,
            LevelRequest::Increment(by) => self.increment_level(by),
        }
    }

    /// Stamps `requested`: clamps it, advances its step, resets every level
    /// strictly above it, makes it current, and bumps the global sequence.
    ///
    /// Ancestors keep their counts; only descendants start fresh under the
    /// new step.
    pub fn advance(&mut self, requested: i32) -> StepLabel {
        let level = self.bounds.clamp(requested);
        let slot = self.bounds.slot(level);
        self.steps[slot] += 1;
        let step = self.steps[slot];
        for descendant in &mut self.steps[slot + 1..] {
            *descendant = 0;
        }
        self.current_level = level;
        self.sequence += 1;
        StepLabel {
            level,
            step,
            sequence: self.sequence,
        }
    }

    /// Resolves a request and stamps the result.
    ///
    /// This is the single entry point every emit reduces to: explicit,
    /// repeat, and increment requests all end in one [`advance`](Self::advance)
    /// of the resolved level.
    pub fn stamp(&mut self, request: LevelRequest) -> StepLabel {
        let level = self.resolve(request);
        self.advance(i32::from(level))
    }

    /// Returns the already-computed label for a level without advancing.
    ///
    /// Used by a redirection collaborator to read the in-flight label during
    /// an emit. The reported sequence is the tracker's latest.
    #[must_use]
    pub fn current_label(&self, requested: i32) -> StepLabel {
        let level = self.bounds.clamp(requested);
        StepLabel {
            level,
            step: self.steps[self.bounds.slot(level)],
            sequence: self.sequence,
        }
    }

    /// Computes a fresh label for a level, mutating state exactly like
    /// [`advance`](Self::advance).
    ///
    /// Used by a redirection collaborator stamping an unlabelled line with a
    /// level on the caller's behalf.
    pub fn next_label(&mut self, requested: i32) -> StepLabel {
        self.advance(requested)
    }
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new(LevelBounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_dense_per_level() {
        let mut tracker = StepTracker::default();
        for expected in 1..=4 {
            assert_eq!(tracker.advance(3).step, expected);
        }
    }

    #[test]
    fn stamping_ancestor_resets_descendants() {
        let mut tracker = StepTracker::default();
        tracker.advance(2);
        tracker.advance(3);
        tracker.advance(3);
        assert_eq!(tracker.current_label(3).step, 2);

        tracker.advance(1);
        assert_eq!(tracker.current_label(2).step, 0);
        assert_eq!(tracker.current_label(3).step, 0);
        assert_eq!(tracker.advance(3).step, 1);
    }

    #[test]
    fn stamping_descendant_keeps_ancestors() {
        let mut tracker = StepTracker::default();
        tracker.advance(1);
        tracker.advance(1);
        tracker.advance(4);
        assert_eq!(tracker.current_label(1).step, 2);
    }

    #[test]
    fn out_of_range_stamps_are_clamped_not_rejected() {
        let mut tracker = StepTracker::default();
        assert_eq!(tracker.advance(-7).level, 1);
        assert_eq!(tracker.advance(0).level, 1);
        assert_eq!(tracker.advance(42).level, 5);
        assert_eq!(tracker.current_level(), 5);
    }

    #[test]
    fn repeat_advances_the_same_level() {
        let mut tracker = StepTracker::default();
        tracker.stamp(LevelRequest::Explicit(3));
        let label = tracker.stamp(LevelRequest::Repeat);
        assert_eq!(label.level, 3);
        assert_eq!(label.step, 2);
    }

    #[test]
    fn increment_moves_relative_to_current() {
        let mut tracker = StepTracker::default();
        tracker.stamp(LevelRequest::Explicit(1));
        let label = tracker.stamp(LevelRequest::Increment(2));
        assert_eq!(label.level, 3);
        assert_eq!(label.step, 1);
    }

    #[test]
    fn increment_by_zero_restamps_current_level() {
        let mut tracker = StepTracker::default();
        tracker.stamp(LevelRequest::Explicit(2));
        let label = tracker.stamp(LevelRequest::Increment(0));
        assert_eq!(label.level, 2);
        assert_eq!(label.step, 2);
    }

    #[test]
    fn increment_saturates_at_bounds() {
        let mut tracker = StepTracker::default();
        tracker.stamp(LevelRequest::Explicit(5));
        assert_eq!(tracker.stamp(LevelRequest::Increment(3)).level, 5);
        assert_eq!(tracker.stamp(LevelRequest::Increment(-9)).level, 1);
    }

    #[test]
    fn sequence_increases_across_all_levels() {
        let mut tracker = StepTracker::default();
        assert_eq!(tracker.advance(1).sequence, 1);
        assert_eq!(tracker.advance(3).sequence, 2);
        assert_eq!(tracker.advance(1).sequence, 3);
        assert_eq!(tracker.sequence(), 3);
    }

    #[test]
    fn set_level_does_not_advance_steps() {
        let mut tracker = StepTracker::default();
        tracker.advance(2);
        assert_eq!(tracker.set_level(4), 4);
        assert_eq!(tracker.current_label(4).step, 0);
        assert_eq!(tracker.current_label(2).step, 1);
    }

    #[test]
    fn increment_level_without_stamp_resolves_like_clamp() {
        let mut tracker = StepTracker::default();
        tracker.set_level(4);
        assert_eq!(tracker.increment_level(1), 5);
        assert_eq!(tracker.increment_level(1), 5);
        assert_eq!(tracker.increment_level(-10), 1);
    }

    #[test]
    fn emit_guard_flag_round_trips() {
        let mut tracker = StepTracker::default();
        assert!(!tracker.is_level_active());
        tracker.begin_emit();
        assert!(tracker.is_level_active());
        tracker.end_emit();
        assert!(!tracker.is_level_active());
    }

    #[test]
    fn next_label_matches_advance_semantics() {
        let mut tracker = StepTracker::default();
        tracker.advance(2);
        let label = tracker.next_label(2);
        assert_eq!(label.step, 2);
        assert_eq!(label.sequence, 2);
    }

    #[test]
    fn display_renders_level_dash_step() {
        let label = StepLabel {
            level: 2,
            step: 7,
            sequence: 11,
        };
        assert_eq!(label.to_string(), "2-7");
    }

    #[test]
    fn custom_bounds_shift_the_clamp_targets() {
        let mut tracker = StepTracker::new(LevelBounds::new(1, 3));
        assert_eq!(tracker.advance(0).level, 2);
        assert_eq!(tracker.advance(9).level, 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn label_serializes_field_names() {
        let label = StepLabel {
            level: 1,
            step: 2,
            sequence: 3,
        };
        let json = serde_json::to_string(&label).expect("serialize");
        assert!(json.contains("\"level\":1"));
        assert!(json.contains("\"step\":2"));
        assert!(json.contains("\"sequence\":3"));
    }
}
