//! crates/levels/src/bounds.rs
//! Level range configuration and clamping.

/// Valid level range for a tracker: `(min, max]`.
///
/// `min` is an exclusive lower bound reserved as "below minimum"; it is never
/// a valid resolved level and never has a step counter of its own. `max` is
/// inclusive. The defaults of 0 and 5 give the conventional five-level range
/// `1..=5` used for test logs.
///
/// # Examples
///
/// ```
/// use levels::LevelBounds;
///
/// let bounds = LevelBounds::default();
/// assert_eq!(bounds.min(), 0);
/// assert_eq!(bounds.max(), 5);
/// assert_eq!(bounds.clamp(-3), 1);
/// assert_eq!(bounds.clamp(99), 5);
/// assert_eq!(bounds.clamp(3), 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelBounds {
    min: u8,
    max: u8,
}

impl LevelBounds {
    /// Creates a new range with the given exclusive lower and inclusive upper bounds.
    ///
    /// The range is corrected rather than rejected, matching the permissive
    /// clamping policy of the tracker itself: `min` saturates below
    /// [`u8::MAX`] so `min + 1` always exists, and a `max` at or below `min`
    /// is raised to `min + 1`, leaving a single-level range.
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        let min = if min == u8::MAX { u8::MAX - 1 } else { min };
        let max = if max > min { max } else { min + 1 };
        Self { min, max }
    }

    /// Exclusive lower bound of the valid range.
    #[must_use]
    pub const fn min(self) -> u8 {
        self.min
    }

    /// Inclusive upper bound of the valid range.
    #[must_use]
    pub const fn max(self) -> u8 {
        self.max
    }

    /// Saturates a requested level into the valid range `(min, max]`.
    ///
    /// Requests at or below `min` resolve to `min + 1`; requests above `max`
    /// resolve to `max`. In-range requests pass through unchanged. The
    /// operation is total and idempotent; out-of-range levels are silently
    /// corrected, never rejected, so callers always receive a usable level.
    #[must_use]
    pub fn clamp(self, requested: i32) -> u8 {
        if requested <= i32::from(self.min) {
            self.min + 1
        } else if requested > i32::from(self.max) {
            self.max
        } else {
            requested as u8
        }
    }

    /// Reports whether `level` is a valid resolved level.
    #[must_use]
    pub const fn contains(self, level: u8) -> bool {
        level > self.min && level <= self.max
    }

    /// Number of step counters the range requires, one per valid level.
    #[must_use]
    pub const fn slot_count(self) -> usize {
        (self.max - self.min) as usize
    }

    /// Storage index for a valid resolved level.
    ///
    /// Level `min` itself is never stored, so level `min + 1` maps to slot 0.
    pub(crate) const fn slot(self, level: u8) -> usize {
        (level - self.min - 1) as usize
    }
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self::new(0, 5)
    }
}
