#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/levels-sink/src/lib.rs
//!
//! # Overview
//!
//! `levels-sink` renders the level-step labels computed by the `levels`
//! crate into arbitrary writers. It covers both output policies of the
//! counter: the standalone policy, where the sink prefixes every message
//! with its `level-step` label, and the redirection policy, where an
//! external interceptor owns all textual output and attaches labels itself
//! by polling the tracker.
//!
//! # Design
//!
//! [`LabelSink`] is a lightweight wrapper around an [`std::io::Write`]
//! implementor holding a [`LineMode`] (newline policy) and a [`RenderMode`]
//! (label prefix or message-only). [`RedirectWriter`] is the redirection
//! collaborator: an `io::Write` that buffers until each newline and labels
//! every complete line by consulting a [`SharedTracker`] — in-flight
//! levelled emits reuse the already-computed label, plain prints are
//! stamped at the current level. [`ActiveLevelGuard`] is the RAII marker
//! both paths use to flag an in-flight emit on the tracker.
//!
//! # Invariants
//!
//! - The tracker never calls into a sink; sinks poll the tracker.
//! - A labelled emit advances the counter exactly once, regardless of which
//!   sink renders it.
//! - The in-flight marker is cleared even when rendering fails partway.
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying writer. Stamping itself is total; counter state always
//! reflects the message, even when the write does not complete.
//!
//! # Examples
//!
//! ```
//! use levels::{LevelRequest, StepTracker};
//! use levels_sink::LabelSink;
//!
//! let mut tracker = StepTracker::default();
//! let mut sink = LabelSink::new(Vec::new());
//!
//! sink.emit(&mut tracker, LevelRequest::Explicit(1), "Starting test")?;
//! sink.emit(&mut tracker, LevelRequest::Explicit(2), "Checking precondition")?;
//! sink.emit(&mut tracker, LevelRequest::Explicit(1), "Test complete")?;
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "1-1 Starting test\n2-1 Checking precondition\n1-2 Test complete\n");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # See also
//!
//! - [`levels`] for the counter state machine and request shapes.

mod line_mode;
mod redirect;
mod sink;

pub use line_mode::LineMode;
pub use redirect::{shared, RedirectWriter, SharedTracker};
pub use sink::{ActiveLevelGuard, LabelSink, RenderMode};
