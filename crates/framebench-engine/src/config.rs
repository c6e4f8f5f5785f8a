//! Step configuration.
//!
//! Parameters passed to every `step` call: timestep size and solver
//! iteration counts.

use serde::{Deserialize, Serialize};

use framebench_types::constants::{
    DEFAULT_POSITION_ITERATIONS, DEFAULT_TIMESTEP, DEFAULT_VELOCITY_ITERATIONS,
};

/// Parameters of a single discrete timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepParams {
    /// Timestep size (seconds).
    pub timestep: f32,

    /// Velocity constraint solver iterations.
    pub velocity_iterations: u32,

    /// Position correction iterations.
    pub position_iterations: u32,
}

impl Default for StepParams {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            position_iterations: DEFAULT_POSITION_ITERATIONS,
        }
    }
}
