//! crates/levels-sink/src/line_mode.rs
//! Newline policy for rendered lines.

/// Controls whether a [`LabelSink`](crate::LabelSink) appends a trailing
/// newline when rendering messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline terminator after each rendered message.
    WithNewline,
    /// Emit the rendered message without a trailing newline.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode appends a trailing newline.
    ///
    /// Exposing the behaviour as a method avoids requiring callers to
    /// pattern-match on the enum when mirroring the sink's newline policy.
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}

impl Default for LineMode {
    fn default() -> Self {
        Self::WithNewline
    }
}

impl From<bool> for LineMode {
    /// `true` maps to [`LineMode::WithNewline`], `false` to
    /// [`LineMode::WithoutNewline`].
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    /// Delegates to [`LineMode::append_newline`], keeping the mapping
    /// consistent if further variants appear.
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}
