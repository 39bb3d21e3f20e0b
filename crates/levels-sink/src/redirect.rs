//! crates/levels-sink/src/redirect.rs
//! Output-redirection collaborator.
//!
//! When a host intercepts all textual output (print shims, test-framework
//! hooks), every line funnels through a [`RedirectWriter`]. The writer never
//! receives labels from the tracker; it polls the shared tracker for each
//! complete line and attaches the label itself: in-flight levelled emits
//! reuse the already-computed label, while plain unlabelled prints are
//! stamped at the current level on the caller's behalf.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use levels::{LevelRequest, StepLabel, StepTracker};

/// Tracker handle shared between an emitting call site and the redirection
/// writer it feeds.
///
/// The counter is single-stream and runs on one thread, so a plain
/// `Rc<RefCell<..>>` is the whole sharing story; parallel workers get their
/// own tracker and their own writer.
pub type SharedTracker = Rc<RefCell<StepTracker>>;

/// Creates a [`SharedTracker`] around an owned [`StepTracker`].
#[must_use]
pub fn shared(tracker: StepTracker) -> SharedTracker {
    Rc::new(RefCell::new(tracker))
}

/// Writer that labels every intercepted line by polling a shared tracker.
///
/// Implements [`io::Write`]; partial writes are buffered until a newline
/// arrives, then each complete line is labelled and forwarded. Labelled
/// emits go through [`emit`](Self::emit), which stamps the tracker before
/// writing so the line-labelling path finds the in-flight label via
/// `is_level_active`.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use levels::{LevelRequest, StepTracker};
/// use levels_sink::{shared, RedirectWriter};
///
/// let tracker = shared(StepTracker::default());
/// let mut writer = RedirectWriter::new(Vec::new(), &tracker);
///
/// writer.emit(LevelRequest::Explicit(1), "Starting test")?;
/// // A plain print with no level is stamped at the current level.
/// writeln!(writer, "raw output from the test body")?;
///
/// let output = String::from_utf8(writer.into_inner()?).unwrap();
/// assert_eq!(output, "1-1 Starting test\n1-2 raw output from the test body\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct RedirectWriter<W> {
    inner: W,
    tracker: SharedTracker,
    tag_sequence: bool,
    buffer: Vec<u8>,
}

impl<W> RedirectWriter<W> {
    /// Creates a redirection writer over `inner`, polling `tracker`.
    #[must_use]
    pub fn new(inner: W, tracker: &SharedTracker) -> Self {
        Self {
            inner,
            tracker: Rc::clone(tracker),
            tag_sequence: false,
            buffer: Vec::new(),
        }
    }

    /// Enables or disables sequence tags on forwarded lines.
    ///
    /// When enabled, each line renders as `"level-step [sequence] message"`,
    /// letting a downstream consumer correlate interleaved labelled and
    /// unlabelled output with the global stamp order.
    #[must_use]
    pub fn with_sequence_tags(mut self, enabled: bool) -> Self {
        self.tag_sequence = enabled;
        self
    }

    /// Returns a clone of the shared tracker handle.
    #[must_use]
    pub fn tracker(&self) -> SharedTracker {
        Rc::clone(&self.tracker)
    }
}

impl<W> RedirectWriter<W>
where
    W: Write,
{
    /// Stamps `request` and routes the message through the redirection path.
    ///
    /// The tracker's in-flight marker is held while the message is written,
    /// so the line labelling reuses the freshly stamped label instead of
    /// advancing the counter a second time. The stamped label is returned
    /// for correlation; writer errors propagate unchanged.
    pub fn emit(&mut self, request: LevelRequest, message: &str) -> io::Result<StepLabel> {
        let label = {
            let mut tracker = self.tracker.borrow_mut();
            tracker.begin_emit();
            tracker.stamp(request)
        };
        let result = writeln!(self, "{message}");
        self.tracker.borrow_mut().end_emit();
        result.map(|()| label)
    }

    fn label_line(&mut self, line: &[u8]) -> io::Result<()> {
        let label = {
            let mut tracker = self.tracker.borrow_mut();
            let current = i32::from(tracker.current_level());
            if tracker.is_level_active() {
                tracker.current_label(current)
            } else {
                // Plain print: stamp it at the current level on the
                // caller's behalf.
                tracker.next_label(current)
            }
        };

        if self.tag_sequence {
            write!(self.inner, "{label} [{}] ", label.sequence)?;
        } else {
            write!(self.inner, "{label} ")?;
        }
        self.inner.write_all(line)?;
        self.inner.write_all(b"\n")
    }

    /// Consumes the writer, labelling any unterminated tail as a final line,
    /// and returns the wrapped writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        if !self.buffer.is_empty() {
            let tail = std::mem::take(&mut self.buffer);
            self.label_line(&tail)?;
        }
        Ok(self.inner)
    }
}

impl<W> Write for RedirectWriter<W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        while let Some(newline) = self.buffer.iter().position(|&byte| byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            self.label_line(&line[..line.len() - 1])?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
