//! Harness event types.
//!
//! Events are lightweight value types, emitted only outside timed regions.

use serde::{Deserialize, Serialize};

/// An event emitted by the timing harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchEvent {
    /// Variant index the event belongs to.
    pub variant: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A measured trial finished stepping.
    TrialCompleted {
        trial: u32,
        /// Elapsed stepping time (milliseconds).
        elapsed_ms: f64,
        frames: u32,
    },

    /// A trial was abandoned; its timing is discarded.
    TrialFailed { trial: u32, reason: String },

    /// A warm-up trial finished and was discarded.
    WarmupDiscarded { trial: u32, elapsed_ms: f64 },

    /// A warm-up trial failed. Warm-up trials are numbered separately from
    /// measured ones and never count toward failed trials.
    WarmupFailed { trial: u32, reason: String },

    /// All trials of a variant were reduced to statistics.
    VariantAggregated {
        name: String,
        /// `None` when no trial succeeded.
        average_ms: Option<f64>,
        /// `None` when undefined.
        frames_per_second: Option<f64>,
        successful: u32,
        failed: u32,
    },
}

impl BenchEvent {
    /// Creates a new event for the given variant.
    pub fn new(variant: u32, kind: EventKind) -> Self {
        Self { variant, kind }
    }
}
