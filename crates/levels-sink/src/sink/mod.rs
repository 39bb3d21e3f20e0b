//! crates/levels-sink/src/sink/mod.rs
//! The labelled-line sink over an arbitrary writer.

mod guard;

pub use guard::ActiveLevelGuard;

use std::io::{self, Write};

use levels::{LevelRequest, StepLabel, StepTracker};

use crate::line_mode::LineMode;

/// Selects what a [`LabelSink`] writes for each stamped message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderMode {
    /// Prefix every message with its label: `"level-step message"`.
    ///
    /// This is the standalone policy, used when no redirection collaborator
    /// is intercepting output.
    Labeled,
    /// Write only the message text.
    ///
    /// Used when a redirection collaborator is active: the collaborator
    /// attaches the label itself by polling the tracker, so the sink must
    /// not duplicate it. The stamped label (including the global sequence
    /// index) is still returned to the caller for correlation.
    Plain,
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::Labeled
    }
}

/// Streaming sink that stamps messages on a [`StepTracker`] and renders the
/// labelled lines into an [`io::Write`] target.
///
/// # Examples
///
/// ```
/// use levels::{LevelRequest, StepTracker};
/// use levels_sink::LabelSink;
///
/// let mut tracker = StepTracker::default();
/// let mut sink = LabelSink::new(Vec::new());
///
/// sink.emit(&mut tracker, LevelRequest::Explicit(1), "Starting test")?;
/// sink.emit(&mut tracker, LevelRequest::Explicit(2), "Checking precondition")?;
/// sink.emit(&mut tracker, LevelRequest::Repeat, "Checking another")?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(output, "1-1 Starting test\n2-1 Checking precondition\n2-2 Checking another\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct LabelSink<W> {
    writer: W,
    line_mode: LineMode,
    render_mode: RenderMode,
}

impl<W> LabelSink<W> {
    /// Creates a sink that labels each message and appends a newline.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_parts(writer, LineMode::WithNewline, RenderMode::Labeled)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self::with_parts(writer, line_mode, RenderMode::Labeled)
    }

    /// Creates a sink from an explicit [`LineMode`] and [`RenderMode`].
    #[must_use]
    pub fn with_parts(writer: W, line_mode: LineMode, render_mode: RenderMode) -> Self {
        Self {
            writer,
            line_mode,
            render_mode,
        }
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent emits.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Returns the current [`RenderMode`].
    #[must_use]
    pub const fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Updates the [`RenderMode`] used for subsequent emits.
    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Default for LabelSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

impl<W> LabelSink<W>
where
    W: Write,
{
    /// Stamps `request` on the tracker and renders the message.
    ///
    /// The tracker's in-flight marker is held for the whole call via an
    /// [`ActiveLevelGuard`], so collaborators polling the tracker observe
    /// `is_level_active() == true` while the line is being written. Errors
    /// from the underlying writer propagate unchanged; the stamp itself
    /// cannot fail, so the counter state reflects the message even when the
    /// write does not complete.
    pub fn emit(
        &mut self,
        tracker: &mut StepTracker,
        request: LevelRequest,
        message: &str,
    ) -> io::Result<StepLabel> {
        let mut guard = ActiveLevelGuard::new(tracker);
        let label = guard.stamp(request);

        match self.render_mode {
            RenderMode::Labeled => write!(self.writer, "{label} {message}")?,
            RenderMode::Plain => self.writer.write_all(message.as_bytes())?,
        }
        if self.line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(label)
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_mode_prefixes_level_and_step() {
        let mut tracker = StepTracker::default();
        let mut sink = LabelSink::new(Vec::new());

        sink.emit(&mut tracker, LevelRequest::Explicit(1), "Starting test")
            .expect("emit succeeds");
        sink.emit(&mut tracker, LevelRequest::Explicit(2), "Checking precondition")
            .expect("emit succeeds");

        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("1-1 Starting test"));
        assert_eq!(lines.next(), Some("2-1 Checking precondition"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn plain_mode_writes_message_only() {
        let mut tracker = StepTracker::default();
        let mut sink = LabelSink::with_parts(Vec::new(), LineMode::WithNewline, RenderMode::Plain);

        let label = sink
            .emit(&mut tracker, LevelRequest::Explicit(2), "redirected")
            .expect("emit succeeds");

        assert_eq!(label.to_string(), "2-1");
        assert_eq!(label.sequence, 1);
        assert_eq!(sink.into_inner(), b"redirected\n".to_vec());
    }

    #[test]
    fn without_newline_preserves_output() {
        let mut tracker = StepTracker::default();
        let mut sink = LabelSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);

        sink.emit(&mut tracker, LevelRequest::Explicit(1), "ready")
            .expect("emit succeeds");

        assert_eq!(sink.into_inner(), b"1-1 ready".to_vec());
    }

    #[test]
    fn marker_is_clear_after_emit() {
        let mut tracker = StepTracker::default();
        let mut sink = LabelSink::new(Vec::new());

        sink.emit(&mut tracker, LevelRequest::Explicit(1), "msg")
            .expect("emit succeeds");
        assert!(!tracker.is_level_active());
    }

    #[test]
    fn emit_matches_reference_scenario() {
        let mut tracker = StepTracker::default();
        let mut sink = LabelSink::new(Vec::new());

        for (level, message) in [(1, "A"), (2, "B"), (2, "C"), (1, "D"), (2, "E")] {
            sink.emit(&mut tracker, LevelRequest::Explicit(level), message)
                .expect("emit succeeds");
        }

        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        assert_eq!(output, "1-1 A\n2-1 B\n2-2 C\n1-2 D\n2-1 E\n");
    }

    #[test]
    fn mode_updates_apply_to_subsequent_emits() {
        let mut tracker = StepTracker::default();
        let mut sink = LabelSink::new(Vec::new());
        assert_eq!(sink.render_mode(), RenderMode::Labeled);

        sink.set_render_mode(RenderMode::Plain);
        sink.set_line_mode(LineMode::WithoutNewline);
        sink.emit(&mut tracker, LevelRequest::Explicit(1), "bare")
            .expect("emit succeeds");

        assert_eq!(sink.into_inner(), b"bare".to_vec());
    }
}
