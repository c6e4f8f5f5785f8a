//! Benchmark run configuration.
//!
//! Fixed for the lifetime of a run. Loaded from TOML by the CLI, with
//! missing fields taking their defaults.

use serde::{Deserialize, Serialize};

use framebench_engine::config::StepParams;
use framebench_types::constants::{
    DEFAULT_FRAME_COUNT, DEFAULT_POSITION_ITERATIONS, DEFAULT_TIMESTEP, DEFAULT_TRIAL_COUNT,
    DEFAULT_VELOCITY_ITERATIONS,
};
use framebench_types::{FramebenchError, FramebenchResult};

/// Configuration of a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Measured trials per variant (at least 1).
    pub trial_count: u32,

    /// Frames stepped per trial, unless the variant overrides it.
    pub frame_count: u32,

    /// Timestep size (seconds).
    pub timestep: f32,

    /// Velocity solver iterations per step.
    pub velocity_iterations: u32,

    /// Position solver iterations per step.
    pub position_iterations: u32,

    /// Trials run and discarded before the measured ones.
    pub warmup_trials: u32,

    /// Worker threads for distributing trials. 1 runs sequentially.
    pub workers: u32,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            trial_count: DEFAULT_TRIAL_COUNT,
            frame_count: DEFAULT_FRAME_COUNT,
            timestep: DEFAULT_TIMESTEP,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            position_iterations: DEFAULT_POSITION_ITERATIONS,
            warmup_trials: 0,
            workers: 1,
        }
    }
}

impl BenchmarkConfig {
    /// The piston benchmark's published settings: 10 trials of 800 frames at
    /// 60 Hz with 8 velocity and 3 position iterations.
    pub fn piston_default() -> Self {
        Self::default()
    }

    /// A short run for smoke tests (2 trials of 60 frames).
    pub fn quick() -> Self {
        Self {
            trial_count: 2,
            frame_count: 60,
            ..Default::default()
        }
    }

    /// Checks every field against its valid range.
    pub fn validate(&self) -> FramebenchResult<()> {
        if self.trial_count == 0 {
            return Err(FramebenchError::InvalidConfig(
                "trial_count must be at least 1".into(),
            ));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(FramebenchError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.workers == 0 {
            return Err(FramebenchError::InvalidConfig(
                "workers must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parameters handed to every `step` call.
    pub fn step_params(&self) -> StepParams {
        StepParams {
            timestep: self.timestep,
            velocity_iterations: self.velocity_iterations,
            position_iterations: self.position_iterations,
        }
    }
}
