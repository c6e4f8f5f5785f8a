//! Engine-facing construction definitions.
//!
//! Plain value types describing worlds, bodies, shapes and joints. They carry
//! no engine state, so a scenario can describe itself once and be
//! instantiated into any number of fresh worlds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use framebench_types::constants::{DEFAULT_FRICTION, GRAVITY};
use framebench_types::{BodyId, CollisionFilter};

/// Parameters of a new world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldDef {
    /// Gravity vector (m/s²).
    pub gravity: Vec2,
    /// Whether resting bodies may be put to sleep.
    pub allow_sleep: bool,
}

impl Default for WorldDef {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -GRAVITY),
            allow_sleep: true,
        }
    }
}

/// How a body participates in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves, infinite mass.
    Static,
    /// Moves under forces and contacts.
    Dynamic,
    /// Moves only by its velocity, unaffected by forces.
    Kinematic,
}

/// Definition of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    pub body_type: BodyType,
    /// World-space position of the body origin.
    pub position: Vec2,
    /// Continuous collision (tunneling-resistant integration) for fast bodies.
    pub bullet: bool,
}

impl BodyDef {
    /// A static body at `position`.
    pub fn fixed(position: Vec2) -> Self {
        Self {
            body_type: BodyType::Static,
            position,
            bullet: false,
        }
    }

    /// A dynamic body at `position`.
    pub fn dynamic(position: Vec2) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position,
            bullet: false,
        }
    }

    /// Sets the continuous collision flag.
    pub fn with_bullet(mut self, bullet: bool) -> Self {
        self.bullet = bullet;
        self
    }
}

/// Shape geometry, centered on the body origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box given by its half extents.
    Box { half_width: f32, half_height: f32 },
    /// Circle of the given radius.
    Circle { radius: f32 },
}

impl Shape {
    /// Returns true if every extent is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        match *self {
            Shape::Box {
                half_width,
                half_height,
            } => {
                half_width.is_finite()
                    && half_height.is_finite()
                    && half_width > 0.0
                    && half_height > 0.0
            }
            Shape::Circle { radius } => radius.is_finite() && radius > 0.0,
        }
    }
}

/// A shape together with its material and collision filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDef {
    pub shape: Shape,
    /// Mass density (kg/m²). Required to be positive on dynamic bodies.
    pub density: f32,
    pub friction: f32,
    pub filter: CollisionFilter,
}

impl ShapeDef {
    /// Creates a shape with the given density, default friction and filter.
    pub fn new(shape: Shape, density: f32) -> Self {
        Self {
            shape,
            density,
            friction: DEFAULT_FRICTION,
            filter: CollisionFilter::default(),
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Revolute joint: the two bodies share `anchor` and rotate freely about it.
///
/// `B` is the body reference type: [`BodyId`] when handed to an engine,
/// a declaration key while still part of a scenario plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevoluteJointDef<B = BodyId> {
    pub body_a: B,
    pub body_b: B,
    /// World-space anchor point.
    pub anchor: Vec2,
    pub motor_enabled: bool,
    /// Target angular speed (rad/s).
    pub motor_speed: f32,
    pub max_motor_torque: f32,
    /// Whether the connected bodies collide with each other.
    pub collide_connected: bool,
}

impl<B> RevoluteJointDef<B> {
    /// A passive revolute joint at `anchor`.
    pub fn new(body_a: B, body_b: B, anchor: Vec2) -> Self {
        Self {
            body_a,
            body_b,
            anchor,
            motor_enabled: false,
            motor_speed: 0.0,
            max_motor_torque: 0.0,
            collide_connected: false,
        }
    }

    /// Enables the motor with a target speed and a torque cap.
    pub fn with_motor(mut self, speed: f32, max_torque: f32) -> Self {
        self.motor_enabled = true;
        self.motor_speed = speed;
        self.max_motor_torque = max_torque;
        self
    }
}

/// Prismatic joint: the bodies translate relative to each other only along
/// `axis`, with no relative rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrismaticJointDef<B = BodyId> {
    pub body_a: B,
    pub body_b: B,
    /// World-space anchor point.
    pub anchor: Vec2,
    /// World-space translation axis. Must be non-zero.
    pub axis: Vec2,
    pub motor_enabled: bool,
    /// Target translation speed (m/s).
    pub motor_speed: f32,
    pub max_motor_force: f32,
    pub collide_connected: bool,
}

impl<B> PrismaticJointDef<B> {
    /// A passive prismatic joint at `anchor` along `axis`.
    pub fn new(body_a: B, body_b: B, anchor: Vec2, axis: Vec2) -> Self {
        Self {
            body_a,
            body_b,
            anchor,
            axis,
            motor_enabled: false,
            motor_speed: 0.0,
            max_motor_force: 0.0,
            collide_connected: false,
        }
    }

    /// Enables the motor with a target speed and a force cap.
    pub fn with_motor(mut self, speed: f32, max_force: f32) -> Self {
        self.motor_enabled = true;
        self.motor_speed = speed;
        self.max_motor_force = max_force;
        self
    }
}

/// A joint connecting two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JointDef<B = BodyId> {
    Revolute(RevoluteJointDef<B>),
    Prismatic(PrismaticJointDef<B>),
}

impl<B: Copy> JointDef<B> {
    /// The two connected bodies.
    pub fn bodies(&self) -> (B, B) {
        match self {
            JointDef::Revolute(def) => (def.body_a, def.body_b),
            JointDef::Prismatic(def) => (def.body_a, def.body_b),
        }
    }

    /// Rewrites the body references, e.g. plan keys into engine handles.
    pub fn try_map_bodies<C, E>(
        &self,
        mut f: impl FnMut(B) -> Result<C, E>,
    ) -> Result<JointDef<C>, E> {
        Ok(match *self {
            JointDef::Revolute(def) => JointDef::Revolute(RevoluteJointDef {
                body_a: f(def.body_a)?,
                body_b: f(def.body_b)?,
                anchor: def.anchor,
                motor_enabled: def.motor_enabled,
                motor_speed: def.motor_speed,
                max_motor_torque: def.max_motor_torque,
                collide_connected: def.collide_connected,
            }),
            JointDef::Prismatic(def) => JointDef::Prismatic(PrismaticJointDef {
                body_a: f(def.body_a)?,
                body_b: f(def.body_b)?,
                anchor: def.anchor,
                axis: def.axis,
                motor_enabled: def.motor_enabled,
                motor_speed: def.motor_speed,
                max_motor_force: def.max_motor_force,
                collide_connected: def.collide_connected,
            }),
        })
    }
}

impl<B> From<RevoluteJointDef<B>> for JointDef<B> {
    fn from(def: RevoluteJointDef<B>) -> Self {
        JointDef::Revolute(def)
    }
}

impl<B> From<PrismaticJointDef<B>> for JointDef<B> {
    fn from(def: PrismaticJointDef<B>) -> Self {
        JointDef::Prismatic(def)
    }
}
