//! # framebench-types
//!
//! Shared identifiers, collision filter bits, error types and defaults
//! for the framebench harness.
//!
//! This crate has zero domain logic. It defines the vocabulary that the
//! engine adapter, the scenario builders and the harness share.

pub mod constants;
pub mod error;
pub mod filter;
pub mod ids;

pub use error::{FramebenchError, FramebenchResult};
pub use filter::{CollisionBits, CollisionFilter};
pub use ids::{BodyId, JointId, VariantIndex};
