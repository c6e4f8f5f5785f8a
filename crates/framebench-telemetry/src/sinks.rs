//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::{BenchEvent, EventKind};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &BenchEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared event log filled by a [`VecSink`].
pub type SharedEvents = Arc<Mutex<Vec<BenchEvent>>>;

/// Collects events in memory for testing and inspection.
///
/// The log is shared, so it stays readable after the sink is boxed and
/// handed to a bus.
#[derive(Default)]
pub struct VecSink {
    events: SharedEvents,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the collected events.
    pub fn events(&self) -> SharedEvents {
        Arc::clone(&self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &BenchEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`.
///
/// Failures (measured or warm-up) log at `warn`, discarded warm-ups at
/// `debug`, everything else at `info`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &BenchEvent) {
        match &event.kind {
            EventKind::TrialCompleted {
                trial,
                elapsed_ms,
                frames,
            } => tracing::info!(
                variant = event.variant,
                trial,
                elapsed_ms,
                frames,
                "trial completed"
            ),
            EventKind::TrialFailed { trial, reason } => tracing::warn!(
                variant = event.variant,
                trial,
                reason = %reason,
                "trial failed, timing discarded"
            ),
            EventKind::WarmupFailed { trial, reason } => tracing::warn!(
                variant = event.variant,
                trial,
                reason = %reason,
                "warm-up trial failed"
            ),
            EventKind::WarmupDiscarded { trial, elapsed_ms } => tracing::debug!(
                variant = event.variant,
                trial,
                elapsed_ms,
                "warm-up trial discarded"
            ),
            EventKind::VariantAggregated {
                name,
                average_ms,
                frames_per_second,
                successful,
                failed,
            } => tracing::info!(
                variant = event.variant,
                name = %name,
                average_ms = ?average_ms,
                frames_per_second = ?frames_per_second,
                successful,
                failed,
                "variant aggregated"
            ),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
