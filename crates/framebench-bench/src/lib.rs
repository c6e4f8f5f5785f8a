//! # framebench-bench
//!
//! Timing harness for frame-stepped simulation benchmarks.
//!
//! For every variant of a [`BenchmarkCase`], the [`TimingHarness`] runs a
//! number of trials. Each trial builds a fresh world (untimed), steps it a
//! fixed number of frames under a timer, and yields a [`TrialResult`].
//! Trials are then reduced to [`AggregateStats`].

pub mod case;
pub mod config;
pub mod metrics;
pub mod runner;

pub use case::{BenchmarkCase, ScenarioCase};
pub use config::BenchmarkConfig;
pub use metrics::{aggregate, AggregateStats, HarnessReport, TrialResult};
pub use runner::TimingHarness;
