#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/levels/src/lib.rs
//!
//! # Overview
//!
//! `levels` assigns hierarchical level-step labels to a stream of test log
//! messages. Each message carries a level (1 is a top-level phase, 2 a
//! sub-step within it, and so on) and a per-level step number, producing
//! output like `1-1`, `2-1`, `2-2`, `1-2` that lets a reader reconstruct
//! nesting from a flat log.
//!
//! # Design
//!
//! The crate is built around [`StepTracker`], an explicitly owned state
//! machine: step counters advance densely per level, and stamping a level
//! resets every counter strictly above it while ancestors keep their counts.
//! Request shapes ([`LevelRequest`]) cover explicit levels, "repeat the
//! previous level", and relative increments; all three reduce to one clamped
//! level before the step advances. [`thread_local`] layers a per-thread
//! tracker plus event buffer over the core for call sites that do not want
//! to thread a tracker handle through a test harness, and the `step!` family
//! of macros adds format-args ergonomics on top of that.
//!
//! # Invariants
//!
//! - The current level always lies inside the configured [`LevelBounds`].
//! - Steps per level are dense (1, 2, …, n) between resets; no value is
//!   skipped or reused.
//! - Resets only travel upward: stamping a level never touches the counters
//!   of shallower levels.
//!
//! # Errors
//!
//! The counter is a total function over clamped integers: out-of-range
//! levels saturate to the nearest bound and an omitted level is a valid
//! "repeat" request. Nothing here returns `Result`; strict validation, if a
//! host wants it, belongs in a layer above the tracker.
//!
//! # Examples
//!
//! ```
//! use levels::{LevelRequest, StepTracker};
//!
//! let mut tracker = StepTracker::default();
//! assert_eq!(tracker.stamp(LevelRequest::Explicit(1)).to_string(), "1-1");
//! assert_eq!(tracker.stamp(LevelRequest::Explicit(2)).to_string(), "2-1");
//! assert_eq!(tracker.stamp(LevelRequest::Repeat).to_string(), "2-2");
//! assert_eq!(tracker.stamp(LevelRequest::Explicit(1)).to_string(), "1-2");
//! ```
//!
//! # See also
//!
//! - `levels-sink` for rendering labelled lines to writers and for the
//!   output-redirection collaborator.

mod bounds;
mod macros;
mod request;
pub mod thread_local;
mod tracker;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use bounds::LevelBounds;
pub use request::LevelRequest;
pub use thread_local::StepEvent;
pub use tracker::{StepLabel, StepTracker};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{init_tracing, StepLayer};
