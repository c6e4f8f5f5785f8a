//! Simulation world contract — the seam between the harness and a physics
//! engine.
//!
//! The harness drives every engine through these two traits:
//!
//! ```text
//! let mut world = engine.create_world(&world_def);
//! let body = world.create_body(&body_def)?;
//! world.attach_shape(body, &shape_def)?;
//! world.create_joint(&joint_def)?;
//! loop {
//!     world.step(&params)?;
//! }
//! ```
//!
//! A world exclusively owns every body and joint created in it. Dropping
//! the world discards all of them as a unit, so nothing leaks into the
//! next trial.

use glam::Vec2;

use framebench_types::{BodyId, FramebenchResult, JointId};

use crate::config::StepParams;
use crate::defs::{BodyDef, JointDef, ShapeDef, WorldDef};

/// Factory for independent simulation worlds.
///
/// `Sync` so that trials may be distributed across worker threads; each
/// worker creates and owns its own world.
pub trait SimulationEngine: Sync {
    /// The world type produced by this engine.
    type World: SimulationWorld;

    /// Creates an empty world.
    fn create_world(&self, def: &WorldDef) -> Self::World;

    /// Returns the engine's name.
    fn name(&self) -> &str;
}

/// One simulation world.
pub trait SimulationWorld {
    /// Creates a body without shapes.
    fn create_body(&mut self, def: &BodyDef) -> FramebenchResult<BodyId>;

    /// Attaches a shape to an existing body.
    fn attach_shape(&mut self, body: BodyId, shape: &ShapeDef) -> FramebenchResult<()>;

    /// Creates a joint between two existing bodies.
    fn create_joint(&mut self, def: &JointDef) -> FramebenchResult<JointId>;

    /// Advances the world by exactly one timestep.
    ///
    /// Deterministic given an identical prior call sequence. Returns
    /// [`FramebenchError::EngineStepFailure`](framebench_types::FramebenchError::EngineStepFailure)
    /// if the engine reaches an invalid internal state.
    fn step(&mut self, params: &StepParams) -> FramebenchResult<()>;

    /// Number of bodies created in this world.
    fn body_count(&self) -> usize;

    /// Number of joints created in this world.
    fn joint_count(&self) -> usize;

    /// Continuous collision flag of `body`, `None` for an unknown handle.
    fn is_bullet(&self, body: BodyId) -> Option<bool>;

    /// Current world-space position of `body`, `None` for an unknown handle.
    fn body_position(&self, body: BodyId) -> Option<Vec2>;

    /// Returns true if the engine's collision filtering lets any shape of
    /// `a` be a collision candidate against any shape of `b`.
    fn should_collide(&self, a: BodyId, b: BodyId) -> bool;
}
