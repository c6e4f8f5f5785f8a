//! # framebench-telemetry
//!
//! Event bus for harness telemetry. The harness emits structured events
//! (trial completed, trial failed, warm-up discarded, variant aggregated)
//! after each timed region closes, and pluggable sinks consume them.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{BenchEvent, EventKind};
pub use sinks::{EventSink, TracingSink, VecSink};
