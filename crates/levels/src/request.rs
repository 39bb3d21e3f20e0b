//! crates/levels/src/request.rs
//! Request shapes accepted when stamping a message.

/// How the level for an incoming message is chosen.
///
/// All three shapes reduce to a single clamped level before the step counter
/// advances. [`Repeat`](Self::Repeat) and `Increment(0)` both resolve to the
/// tracker's current level and still advance its step; the step always moves
/// on every stamp, only the level may repeat.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelRequest {
    /// Use the given level, clamped into the valid range.
    Explicit(i32),
    /// Reuse the level of the previous message.
    Repeat,
    /// Move relative to the current level, clamped into the valid range.
    Increment(i32),
}

impl Default for LevelRequest {
    /// An omitted level means "repeat the previous level".
    fn default() -> Self {
        Self::Repeat
    }
}

impl From<i32> for LevelRequest {
    fn from(level: i32) -> Self {
        Self::Explicit(level)
    }
}

impl From<Option<i32>> for LevelRequest {
    /// Maps the optional-level calling convention onto request shapes:
    /// `Some(level)` is explicit, `None` repeats the previous level.
    fn from(level: Option<i32>) -> Self {
        level.map_or(Self::Repeat, Self::Explicit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_repeat() {
        assert_eq!(LevelRequest::default(), LevelRequest::Repeat);
    }

    #[test]
    fn from_integer_is_explicit() {
        assert_eq!(LevelRequest::from(3), LevelRequest::Explicit(3));
        assert_eq!(LevelRequest::from(-1), LevelRequest::Explicit(-1));
    }

    #[test]
    fn from_option_maps_none_to_repeat() {
        assert_eq!(LevelRequest::from(Some(2)), LevelRequest::Explicit(2));
        assert_eq!(LevelRequest::from(None), LevelRequest::Repeat);
    }
}
