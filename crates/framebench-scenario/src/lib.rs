//! # framebench-scenario
//!
//! Declarative scenario construction for frame-stepped benchmarks.
//!
//! A [`ScenarioPlan`] is an ordered list of body and joint declarations.
//! It is validated as a whole and then instantiated into a fresh world,
//! once per trial. Creation order is preserved exactly, since engines may
//! iterate bodies and joints in creation order.
//!
//! Scenarios:
//! 1. **Piston** — motorized crank/follower/piston mechanism pushing a pile
//!    of boxes and circles, with and without continuous collision

pub mod builder;
pub mod piston;
pub mod plan;

pub use builder::ScenarioBuilder;
pub use piston::PistonScenario;
pub use plan::{BodyKey, BuiltScenario, ScenarioPlan};
