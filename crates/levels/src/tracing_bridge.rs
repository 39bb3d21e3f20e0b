//! crates/levels/src/tracing_bridge.rs
//! Bridge between the tracing crate and the level-step counter.
//!
//! This module provides a tracing-subscriber layer that routes tracing
//! events through the current thread's [`StepTracker`], so code instrumented
//! with the standard tracing macros picks up level-step labels without
//! calling the stamping API directly.
//!
//! # Usage
//!
//! ```rust,ignore
//! use levels::{init_tracing, LevelBounds};
//!
//! init_tracing(LevelBounds::default());
//!
//! tracing::info!("starting suite");   // stamped at level 1
//! tracing::debug!("checking detail"); // stamped at level 2
//! ```

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use super::bounds::LevelBounds;
use super::thread_local;

/// A tracing layer that stamps each event with a level-step label.
///
/// The event's verbosity selects the requested level: error, warning, and
/// info events stamp at the top level, debug events one level in, trace
/// events one further. The request is clamped by the thread's tracker like
/// any other, so the layer never drops or rejects an event.
pub struct StepLayer;

impl StepLayer {
    /// Map a tracing verbosity to a level request.
    const fn level_request(level: &Level) -> i32 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for StepLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let requested = Self::level_request(event.metadata().level());

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            thread_local::step(message, Some(requested));
        }
    }
}

/// Visitor to extract the message field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Initialize tracing with step labelling over the given level range.
///
/// Sets up the current thread's tracker and installs a [`StepLayer`] as the
/// global subscriber. Stamped events accumulate in the thread-local buffer
/// drained by [`thread_local::drain_events`].
pub fn init_tracing(bounds: LevelBounds) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    thread_local::init(bounds);

    tracing_subscriber::registry().with(StepLayer).init();
}
