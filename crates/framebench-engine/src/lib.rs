//! # framebench-engine
//!
//! The simulation-world contract consumed by the harness, and an adapter
//! that fulfils it with `rapier2d`.
//!
//! ## Key Types
//!
//! - [`SimulationEngine`] — creates fresh, independent worlds
//! - [`SimulationWorld`] — body/shape/joint construction and stepping
//! - [`StepParams`] — timestep and solver iteration counts
//! - [`RapierEngine`] — `rapier2d`-backed engine

pub mod config;
pub mod defs;
pub mod rapier;
pub mod world;

pub use config::StepParams;
pub use defs::{
    BodyDef, BodyType, JointDef, PrismaticJointDef, RevoluteJointDef, Shape, ShapeDef, WorldDef,
};
pub use rapier::{RapierEngine, RapierWorld};
pub use world::{SimulationEngine, SimulationWorld};
