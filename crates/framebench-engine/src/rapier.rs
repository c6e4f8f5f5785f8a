//! `rapier2d` adapter.
//!
//! Maps the world contract onto a rapier physics pipeline. Every world owns
//! its own body, collider and joint sets plus pipeline state, so two worlds
//! never share anything. Handles are issued in creation order.
//!
//! Collision filters map to rapier interaction groups: the category becomes
//! the membership bits, the mask becomes the filter bits. Rapier applies the
//! same mutual-acceptance rule as [`CollisionFilter::should_collide`].
//!
//! Rapier does not report internal failures from its pipeline, so the
//! adapter checks every body for non-finite positions or velocities after
//! each step and reports those as a step failure.
//!
//! [`CollisionFilter::should_collide`]: framebench_types::CollisionFilter::should_collide

use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::dynamics::{
    CCDSolver, ImpulseJointHandle, ImpulseJointSet, IntegrationParameters, IslandManager,
    MultibodyJointSet, PrismaticJointBuilder, RevoluteJointBuilder, RigidBody, RigidBodyBuilder,
    RigidBodyHandle, RigidBodySet,
};
use rapier2d::geometry::{
    ColliderBuilder, ColliderSet, DefaultBroadPhase, Group, InteractionGroups, NarrowPhase,
};
use rapier2d::math::{Point, Real, Vector};
use rapier2d::na::Unit;
use rapier2d::pipeline::PhysicsPipeline;

use framebench_types::{BodyId, CollisionFilter, FramebenchError, FramebenchResult, JointId};

use crate::config::StepParams;
use crate::defs::{BodyDef, BodyType, JointDef, Shape, ShapeDef, WorldDef};
use crate::world::{SimulationEngine, SimulationWorld};

/// Damping factor handed to rapier's velocity motors.
///
/// Stiff enough that a motor closes its velocity error within a step, so
/// the configured max torque or force is the only limit on it.
const MOTOR_FACTOR: Real = 1.0e4;

/// Engine that creates `rapier2d` worlds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RapierEngine;

impl RapierEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl SimulationEngine for RapierEngine {
    type World = RapierWorld;

    fn create_world(&self, def: &WorldDef) -> RapierWorld {
        RapierWorld::new(def)
    }

    fn name(&self) -> &str {
        "rapier2d"
    }
}

/// A single rapier world and its pipeline state.
pub struct RapierWorld {
    gravity: Vector<Real>,
    allow_sleep: bool,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Rapier handle per issued [`BodyId`], in creation order.
    body_handles: Vec<RigidBodyHandle>,
    /// Rapier handle per issued [`JointId`], in creation order.
    joint_handles: Vec<ImpulseJointHandle>,
    /// Number of completed steps.
    frame: u32,
}

impl RapierWorld {
    /// Creates an empty world.
    pub fn new(def: &WorldDef) -> Self {
        Self {
            gravity: Vector::new(def.gravity.x, def.gravity.y),
            allow_sleep: def.allow_sleep,
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            body_handles: Vec::new(),
            joint_handles: Vec::new(),
            frame: 0,
        }
    }

    /// Number of steps taken so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Angular velocity of `body` (rad/s), `None` for an unknown handle.
    pub fn angular_velocity(&self, body: BodyId) -> Option<f32> {
        self.body(body).map(RigidBody::angvel)
    }

    /// Linear velocity of `body`, `None` for an unknown handle.
    pub fn linear_velocity(&self, body: BodyId) -> Option<Vec2> {
        self.body(body).map(|b| {
            let v = b.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    fn handle(&self, body: BodyId) -> FramebenchResult<RigidBodyHandle> {
        self.body_handles
            .get(body.index())
            .copied()
            .ok_or_else(|| FramebenchError::construction(format!("unknown body #{}", body.0)))
    }

    fn body(&self, body: BodyId) -> Option<&RigidBody> {
        let handle = self.body_handles.get(body.index())?;
        self.bodies.get(*handle)
    }

    /// Converts a world-space point into the local frame of `handle`.
    fn local_point(&self, handle: RigidBodyHandle, world: Vec2) -> Point<Real> {
        self.bodies[handle]
            .position()
            .inverse_transform_point(&Point::new(world.x, world.y))
    }

    /// Finds the first body whose state is no longer finite.
    fn find_invalid_body(&self) -> Option<usize> {
        self.body_handles.iter().position(|handle| {
            let body = &self.bodies[*handle];
            let t = body.translation();
            let v = body.linvel();
            !(t.x.is_finite()
                && t.y.is_finite()
                && v.x.is_finite()
                && v.y.is_finite()
                && body.angvel().is_finite())
        })
    }
}

fn interaction_groups(filter: CollisionFilter) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(u32::from(filter.category.bits())),
        Group::from_bits_truncate(u32::from(filter.mask.bits())),
    )
}

impl SimulationWorld for RapierWorld {
    fn create_body(&mut self, def: &BodyDef) -> FramebenchResult<BodyId> {
        if !(def.position.x.is_finite() && def.position.y.is_finite()) {
            return Err(FramebenchError::construction(format!(
                "body position {:?} is not finite",
                def.position
            )));
        }

        let builder = match def.body_type {
            BodyType::Static => RigidBodyBuilder::fixed(),
            BodyType::Dynamic => RigidBodyBuilder::dynamic(),
            BodyType::Kinematic => RigidBodyBuilder::kinematic_velocity_based(),
        };
        let body = builder
            .translation(Vector::new(def.position.x, def.position.y))
            .ccd_enabled(def.bullet)
            .can_sleep(self.allow_sleep)
            .build();

        let id = BodyId(self.body_handles.len() as u32);
        self.body_handles.push(self.bodies.insert(body));
        Ok(id)
    }

    fn attach_shape(&mut self, body: BodyId, shape: &ShapeDef) -> FramebenchResult<()> {
        let handle = self.handle(body)?;
        if !shape.shape.is_valid() {
            return Err(FramebenchError::construction(format!(
                "degenerate shape {:?} on body #{}",
                shape.shape, body.0
            )));
        }

        let builder = match shape.shape {
            Shape::Box {
                half_width,
                half_height,
            } => ColliderBuilder::cuboid(half_width, half_height),
            Shape::Circle { radius } => ColliderBuilder::ball(radius),
        };
        let collider = builder
            .density(shape.density)
            .friction(shape.friction)
            .collision_groups(interaction_groups(shape.filter))
            .build();

        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        Ok(())
    }

    fn create_joint(&mut self, def: &JointDef) -> FramebenchResult<JointId> {
        let (a, b) = def.bodies();
        let (h1, h2) = (self.handle(a)?, self.handle(b)?);

        let handle = match def {
            JointDef::Revolute(def) => {
                let mut builder = RevoluteJointBuilder::new()
                    .local_anchor1(self.local_point(h1, def.anchor))
                    .local_anchor2(self.local_point(h2, def.anchor))
                    .contacts_enabled(def.collide_connected);
                if def.motor_enabled {
                    builder = builder
                        .motor_velocity(def.motor_speed, MOTOR_FACTOR)
                        .motor_max_force(def.max_motor_torque);
                }
                self.impulse_joints.insert(h1, h2, builder.build(), true)
            }
            JointDef::Prismatic(def) => {
                if !(def.axis.length_squared() > 0.0 && def.axis.is_finite()) {
                    return Err(FramebenchError::construction(format!(
                        "prismatic axis {:?} is degenerate",
                        def.axis
                    )));
                }
                // Bodies are created unrotated, so the world axis is also
                // the local axis of both bodies.
                let axis = Unit::new_normalize(Vector::new(def.axis.x, def.axis.y));
                let mut builder = PrismaticJointBuilder::new(axis)
                    .local_anchor1(self.local_point(h1, def.anchor))
                    .local_anchor2(self.local_point(h2, def.anchor))
                    .contacts_enabled(def.collide_connected);
                if def.motor_enabled {
                    builder = builder
                        .motor_velocity(def.motor_speed, MOTOR_FACTOR)
                        .motor_max_force(def.max_motor_force);
                }
                self.impulse_joints.insert(h1, h2, builder.build(), true)
            }
        };

        let id = JointId(self.joint_handles.len() as u32);
        self.joint_handles.push(handle);
        Ok(id)
    }

    fn step(&mut self, params: &StepParams) -> FramebenchResult<()> {
        self.integration_parameters.dt = params.timestep;
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(params.velocity_iterations as usize).unwrap_or(NonZeroUsize::MIN);
        self.integration_parameters.num_internal_pgs_iterations =
            (params.position_iterations as usize).max(1);

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        if let Some(index) = self.find_invalid_body() {
            return Err(FramebenchError::EngineStepFailure {
                frame: self.frame,
                reason: format!("body #{index} has a non-finite state"),
            });
        }
        self.frame += 1;
        Ok(())
    }

    fn body_count(&self) -> usize {
        self.body_handles.len()
    }

    fn joint_count(&self) -> usize {
        self.joint_handles.len()
    }

    fn is_bullet(&self, body: BodyId) -> Option<bool> {
        self.body(body).map(RigidBody::is_ccd_enabled)
    }

    fn body_position(&self, body: BodyId) -> Option<Vec2> {
        self.body(body).map(|b| {
            let t = b.translation();
            Vec2::new(t.x, t.y)
        })
    }

    fn should_collide(&self, a: BodyId, b: BodyId) -> bool {
        let (Some(body_a), Some(body_b)) = (self.body(a), self.body(b)) else {
            return false;
        };
        body_a.colliders().iter().any(|ca| {
            body_b.colliders().iter().any(|cb| {
                match (self.colliders.get(*ca), self.colliders.get(*cb)) {
                    (Some(x), Some(y)) => x.collision_groups().test(y.collision_groups()),
                    _ => false,
                }
            })
        })
    }
}
