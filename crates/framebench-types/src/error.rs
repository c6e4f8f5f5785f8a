//! Error types for framebench.
//!
//! All crates return `FramebenchResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the harness, the scenario builders and the
/// engine adapter.
#[derive(Debug, Error)]
pub enum FramebenchError {
    /// A scenario definition is malformed (unbuilt body reference,
    /// non-positive density, degenerate shape). Raised before any stepping.
    #[error("Scenario construction failed: {0}")]
    ScenarioConstruction(String),

    /// The engine reported an unrecoverable internal state while stepping.
    #[error("Engine step failed at frame {frame}: {reason}")]
    EngineStepFailure {
        /// Zero-based frame index of the failing step.
        frame: u32,
        /// Engine-provided description.
        reason: String,
    },

    /// No statistic can be derived (zero successful trials or zero frames).
    #[error("Statistics undefined for '{variant}': {reason}")]
    StatisticsUndefined {
        /// Variant name.
        variant: String,
        /// Why the value is undefined.
        reason: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FramebenchError {
    /// Shorthand for a [`FramebenchError::ScenarioConstruction`] error.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::ScenarioConstruction(msg.into())
    }

    /// Returns true if the error happened while stepping a trial.
    pub fn is_step_failure(&self) -> bool {
        matches!(self, Self::EngineStepFailure { .. })
    }
}

/// Convenience alias for `Result<T, FramebenchError>`.
pub type FramebenchResult<T> = Result<T, FramebenchError>;
