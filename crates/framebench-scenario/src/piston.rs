//! Piston scenario — a motorized crank/follower/piston mechanism constantly
//! bumping a pile of boxes and circles.
//!
//! A decent mix of circle and polygon contacts with very little joint work.
//! Two variants differ only in the payload's continuous collision flag:
//!
//! | Variant | Name                   | Payload bullets |
//! |---------|------------------------|-----------------|
//! | 0       | `Pistons (bullets)`    | on              |
//! | 1       | `Pistons (no bullets)` | off             |
//!
//! Known engine behavior: in some runs payload bodies fall through the thin,
//! fast-moving piston even with continuous collision enabled. This comes
//! from the engine's narrow phase and is left visible on purpose; neither
//! the scenario nor the harness retries or corrects for it.

use std::f32::consts::PI;

use glam::Vec2;

use framebench_engine::defs::{
    BodyDef, PrismaticJointDef, RevoluteJointDef, Shape, ShapeDef, WorldDef,
};
use framebench_types::constants::GRAVITY;
use framebench_types::{CollisionFilter, FramebenchError, FramebenchResult, VariantIndex};

use crate::builder::ScenarioBuilder;
use crate::plan::ScenarioPlan;

/// Collision categories used by the piston scenario.
pub mod category {
    use framebench_types::CollisionBits;

    /// The piston head. Crank and follower keep the default category,
    /// which is the same bit.
    pub const PISTON: CollisionBits = CollisionBits::bit(0);
    /// Boxes and circles of the payload pile.
    pub const PAYLOAD: CollisionBits = CollisionBits::bit(1);
    /// The two static boundary rails.
    pub const RAIL: CollisionBits = CollisionBits::bit(2);
}

/// Body labels used in [`BuiltScenario`](crate::plan::BuiltScenario).
pub mod label {
    pub const ANCHOR: &str = "anchor";
    pub const RAIL: &str = "rail";
    pub const CRANK: &str = "crank";
    pub const FOLLOWER: &str = "follower";
    pub const PISTON: &str = "piston";
    pub const PAYLOAD_BOX: &str = "payload_box";
    pub const PAYLOAD_CIRCLE: &str = "payload_circle";

    pub const CRANK_MOTOR: &str = "crank_motor";
    pub const FOLLOWER_PIVOT: &str = "follower_pivot";
    pub const PISTON_PIVOT: &str = "piston_pivot";
    pub const PISTON_SLIDER: &str = "piston_slider";
}

/// Default number of payload bodies per shape kind.
pub const DEFAULT_PAYLOAD_PER_KIND: u32 = 100;

const RAIL_HALF_EXTENTS: Vec2 = Vec2::new(1.0, 100.0);
const RAIL_X: f32 = 6.01;
const RAIL_Y: f32 = 50.0;

const LINK_DENSITY: f32 = 2.0;
const CRANK_SPEED: f32 = PI;
const CRANK_MAX_TORQUE: f32 = 20_000.0;
const PISTON_MAX_FORCE: f32 = 1_000.0;

const PAYLOAD_BASE_Y: f32 = 23.0;
const PAYLOAD_BOX_X: f32 = -1.0;
const PAYLOAD_CIRCLE_X: f32 = 1.0;
const PAYLOAD_BOX_HALF_EXTENTS: Vec2 = Vec2::new(0.4, 0.3);
const PAYLOAD_BOX_DENSITY: f32 = 0.1;
const PAYLOAD_CIRCLE_RADIUS: f32 = 0.36;
const PAYLOAD_CIRCLE_DENSITY: f32 = 2.0;

/// The piston benchmark scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct PistonScenario {
    /// Payload bodies per shape kind (boxes and circles each).
    pub payload_per_kind: u32,
    /// Per-variant frame count override. `None` uses the run config.
    pub frames: Option<u32>,
}

impl Default for PistonScenario {
    fn default() -> Self {
        Self {
            payload_per_kind: DEFAULT_PAYLOAD_PER_KIND,
            frames: None,
        }
    }
}

impl PistonScenario {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of payload bodies per shape kind.
    pub fn with_payload(mut self, per_kind: u32) -> Self {
        self.payload_per_kind = per_kind;
        self
    }

    /// Overrides the frame count of both variants.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Whether payload bodies use continuous collision in `variant`.
    pub fn bullets(variant: VariantIndex) -> bool {
        variant.0 == 0
    }

    /// Total bodies built per trial: anchor, two rails, three links, payload.
    pub fn expected_body_count(&self) -> usize {
        1 + 2 + 3 + 2 * self.payload_per_kind as usize
    }

    /// Builds the plan for a given continuous collision setting.
    pub fn build_plan(&self, bullets: bool) -> ScenarioPlan {
        let mut plan = ScenarioPlan::new(WorldDef {
            gravity: Vec2::new(0.0, -GRAVITY),
            allow_sleep: true,
        });

        // 1. Anchor: static, no shape.
        let anchor = plan.add_body(label::ANCHOR, BodyDef::fixed(Vec2::ZERO), vec![]);

        // 2. Boundary rails.
        let rail_shape = ShapeDef::new(
            Shape::Box {
                half_width: RAIL_HALF_EXTENTS.x,
                half_height: RAIL_HALF_EXTENTS.y,
            },
            0.0,
        )
        .with_friction(0.0)
        .with_filter(CollisionFilter::new(category::RAIL, category::PAYLOAD));
        for x in [-RAIL_X, RAIL_X] {
            plan.add_body(label::RAIL, BodyDef::fixed(Vec2::new(x, RAIL_Y)), vec![rail_shape]);
        }

        // 3. Crank, follower and piston.
        let crank = plan.add_body(
            label::CRANK,
            BodyDef::dynamic(Vec2::new(0.0, 7.0)),
            vec![link_shape(0.5, 2.0)],
        );
        plan.add_joint(
            label::CRANK_MOTOR,
            RevoluteJointDef::new(anchor, crank, Vec2::new(0.0, 5.0))
                .with_motor(CRANK_SPEED, CRANK_MAX_TORQUE),
        );

        let follower = plan.add_body(
            label::FOLLOWER,
            BodyDef::dynamic(Vec2::new(0.0, 13.0)),
            vec![link_shape(0.5, 4.0)],
        );
        plan.add_joint(
            label::FOLLOWER_PIVOT,
            RevoluteJointDef::new(crank, follower, Vec2::new(0.0, 9.0)),
        );

        let piston = plan.add_body(
            label::PISTON,
            BodyDef::dynamic(Vec2::new(0.0, 17.0)),
            vec![link_shape(7.0, 1.5)
                .with_filter(CollisionFilter::new(category::PISTON, category::PAYLOAD))],
        );
        plan.add_joint(
            label::PISTON_PIVOT,
            RevoluteJointDef::new(follower, piston, Vec2::new(0.0, 17.0)),
        );
        plan.add_joint(
            label::PISTON_SLIDER,
            PrismaticJointDef::new(anchor, piston, Vec2::new(0.0, 17.0), Vec2::Y)
                .with_motor(0.0, PISTON_MAX_FORCE),
        );

        // 4. Payload: all boxes first, then all circles.
        let payload_filter = CollisionFilter::new(
            category::PAYLOAD,
            category::PISTON | category::RAIL | category::PAYLOAD,
        );
        let payload_box = ShapeDef::new(
            Shape::Box {
                half_width: PAYLOAD_BOX_HALF_EXTENTS.x,
                half_height: PAYLOAD_BOX_HALF_EXTENTS.y,
            },
            PAYLOAD_BOX_DENSITY,
        )
        .with_filter(payload_filter);
        let payload_circle = ShapeDef::new(
            Shape::Circle {
                radius: PAYLOAD_CIRCLE_RADIUS,
            },
            PAYLOAD_CIRCLE_DENSITY,
        )
        .with_filter(payload_filter);

        for (body_label, x, shape) in [
            (label::PAYLOAD_BOX, PAYLOAD_BOX_X, payload_box),
            (label::PAYLOAD_CIRCLE, PAYLOAD_CIRCLE_X, payload_circle),
        ] {
            for i in 0..self.payload_per_kind {
                let position = Vec2::new(x, PAYLOAD_BASE_Y + i as f32);
                plan.add_body(
                    body_label,
                    BodyDef::dynamic(position).with_bullet(bullets),
                    vec![shape],
                );
            }
        }

        plan
    }
}

fn link_shape(half_width: f32, half_height: f32) -> ShapeDef {
    ShapeDef::new(
        Shape::Box {
            half_width,
            half_height,
        },
        LINK_DENSITY,
    )
}

impl ScenarioBuilder for PistonScenario {
    fn variant_count(&self) -> usize {
        2
    }

    fn variant_name(&self, variant: VariantIndex) -> String {
        if Self::bullets(variant) {
            "Pistons (bullets)".to_string()
        } else {
            "Pistons (no bullets)".to_string()
        }
    }

    fn frame_count(&self, _variant: VariantIndex) -> Option<u32> {
        self.frames
    }

    fn plan(&self, variant: VariantIndex) -> FramebenchResult<ScenarioPlan> {
        if variant.index() >= self.variant_count() {
            return Err(FramebenchError::construction(format!(
                "piston scenario has no variant {variant}"
            )));
        }
        Ok(self.build_plan(Self::bullets(variant)))
    }
}
