//! Physical constants and benchmark defaults.

/// Gravitational acceleration used by the benchmark worlds (m/s²).
pub const GRAVITY: f32 = 10.0;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Default velocity solver iterations per step.
pub const DEFAULT_VELOCITY_ITERATIONS: u32 = 8;

/// Default position solver iterations per step.
pub const DEFAULT_POSITION_ITERATIONS: u32 = 3;

/// Default number of measured trials per variant.
pub const DEFAULT_TRIAL_COUNT: u32 = 10;

/// Default number of frames stepped per trial.
pub const DEFAULT_FRAME_COUNT: u32 = 800;

/// Friction applied to shapes that do not set one explicitly.
pub const DEFAULT_FRICTION: f32 = 0.2;

/// Milliseconds per second, used by the throughput figures.
pub const MILLIS_PER_SECOND: f64 = 1000.0;
