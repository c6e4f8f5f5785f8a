//! Integration tests for framebench-scenario.

use glam::Vec2;

use framebench_engine::config::StepParams;
use framebench_engine::defs::{BodyDef, JointDef, RevoluteJointDef, Shape, ShapeDef, WorldDef};
use framebench_engine::rapier::RapierEngine;
use framebench_engine::world::{SimulationEngine, SimulationWorld};
use framebench_scenario::piston::{category, label, PistonScenario};
use framebench_scenario::plan::{BodyKey, BuiltScenario, PlanStep, ScenarioPlan};
use framebench_scenario::ScenarioBuilder;
use framebench_types::{CollisionBits, CollisionFilter, FramebenchError, VariantIndex};

const BULLETS: VariantIndex = VariantIndex(0);
const NO_BULLETS: VariantIndex = VariantIndex(1);

fn build(scenario: &PistonScenario, variant: VariantIndex) -> (framebench_engine::RapierWorld, BuiltScenario) {
    let plan = scenario.plan(variant).unwrap();
    let mut world = RapierEngine::new().create_world(plan.world());
    let built = plan.instantiate(&mut world).unwrap();
    (world, built)
}

// ─── Piston Plan Tests ────────────────────────────────────────

#[test]
fn piston_variants() {
    let s = PistonScenario::new();
    assert_eq!(s.variant_count(), 2);
    assert_eq!(s.variant_name(BULLETS), "Pistons (bullets)");
    assert_eq!(s.variant_name(NO_BULLETS), "Pistons (no bullets)");
    assert_eq!(s.frame_count(BULLETS), None);
    assert_eq!(s.clone().with_frames(50).frame_count(NO_BULLETS), Some(50));
}

#[test]
fn piston_plan_counts() {
    let s = PistonScenario::new();
    for variant in [BULLETS, NO_BULLETS] {
        let plan = s.plan(variant).unwrap();
        assert_eq!(plan.body_count(), 206); // 100*2 payload + 3 links + 2 rails + anchor
        assert_eq!(plan.body_count(), s.expected_body_count());
        assert_eq!(plan.joint_count(), 4); // 3 revolute + 1 prismatic
    }
}

#[test]
fn piston_construction_order() {
    let plan = PistonScenario::new().with_payload(2).plan(BULLETS).unwrap();
    let order: Vec<&str> = plan
        .steps()
        .iter()
        .map(|step| match step {
            PlanStep::Body(body) => body.label,
            PlanStep::Joint(joint) => joint.label,
        })
        .collect();

    assert_eq!(
        order,
        vec![
            label::ANCHOR,
            label::RAIL,
            label::RAIL,
            label::CRANK,
            label::CRANK_MOTOR,
            label::FOLLOWER,
            label::FOLLOWER_PIVOT,
            label::PISTON,
            label::PISTON_PIVOT,
            label::PISTON_SLIDER,
            label::PAYLOAD_BOX,
            label::PAYLOAD_BOX,
            label::PAYLOAD_CIRCLE,
            label::PAYLOAD_CIRCLE,
        ]
    );
}

#[test]
fn piston_joints_are_motorized_as_declared() {
    let plan = PistonScenario::new().plan(BULLETS).unwrap();
    let joints: Vec<&JointDef<BodyKey>> = plan
        .steps()
        .iter()
        .filter_map(|step| match step {
            PlanStep::Joint(joint) => Some(&joint.def),
            PlanStep::Body(_) => None,
        })
        .collect();

    let revolute: Vec<_> = joints
        .iter()
        .filter_map(|j| match j {
            JointDef::Revolute(def) => Some(def),
            JointDef::Prismatic(_) => None,
        })
        .collect();
    assert_eq!(revolute.len(), 3);
    assert!(revolute[0].motor_enabled);
    assert!((revolute[0].motor_speed - std::f32::consts::PI).abs() < 1e-6);
    assert_eq!(revolute[0].max_motor_torque, 20_000.0);
    assert!(!revolute[1].motor_enabled);
    assert!(!revolute[2].motor_enabled);

    match joints[3] {
        JointDef::Prismatic(def) => {
            assert!(def.motor_enabled);
            assert_eq!(def.max_motor_force, 1_000.0);
            assert_eq!(def.axis, Vec2::Y);
            assert_eq!(def.body_a, BodyKey(0));
        }
        JointDef::Revolute(_) => panic!("last joint should be the piston slider"),
    }
}

#[test]
fn plans_are_rebuilt_identically() {
    let s = PistonScenario::new();
    assert_eq!(s.plan(NO_BULLETS).unwrap(), s.plan(NO_BULLETS).unwrap());
    assert_ne!(s.plan(BULLETS).unwrap(), s.plan(NO_BULLETS).unwrap());
}

// ─── Instantiation Tests ──────────────────────────────────────

#[test]
fn instantiated_world_matches_plan() {
    let s = PistonScenario::new();
    for variant in [BULLETS, NO_BULLETS] {
        let (world, built) = build(&s, variant);
        assert_eq!(world.body_count(), 206);
        assert_eq!(world.joint_count(), 4);
        assert_eq!(built.bodies.len(), 206);
        assert_eq!(built.bodies_labeled(label::RAIL).count(), 2);
        assert_eq!(built.bodies_labeled(label::PAYLOAD_BOX).count(), 100);
        assert_eq!(built.bodies_labeled(label::PAYLOAD_CIRCLE).count(), 100);
        assert!(built.joint(label::CRANK_MOTOR).is_some());
        assert!(built.joint(label::PISTON_SLIDER).is_some());
    }
}

#[test]
fn bullet_flag_follows_variant() {
    let s = PistonScenario::new();

    let (world, built) = build(&s, BULLETS);
    let payload: Vec<_> = built
        .bodies
        .iter()
        .filter(|b| b.label == label::PAYLOAD_BOX || b.label == label::PAYLOAD_CIRCLE)
        .collect();
    assert_eq!(payload.len(), 200);
    assert!(payload.iter().all(|b| world.is_bullet(b.id) == Some(true)));
    // Mechanism and rails never use continuous collision.
    let others = built.bodies.iter().filter(|b| !payload.iter().any(|p| p.id == b.id));
    assert!(others.clone().count() == 6);
    assert!(others.map(|b| world.is_bullet(b.id)).all(|flag| flag == Some(false)));

    let (world, built) = build(&s, NO_BULLETS);
    assert!(built.bodies.iter().all(|b| world.is_bullet(b.id) == Some(false)));
}

#[test]
fn collision_filters_between_roles() {
    let s = PistonScenario::new().with_payload(3);
    let (world, built) = build(&s, BULLETS);

    let piston = built.body(label::PISTON).unwrap();
    let rails: Vec<_> = built.bodies_labeled(label::RAIL).map(|b| b.id).collect();
    let payload_box = built.body(label::PAYLOAD_BOX).unwrap();
    let payload_circle = built.body(label::PAYLOAD_CIRCLE).unwrap();
    let crank = built.body(label::CRANK).unwrap();

    assert!(world.should_collide(payload_box, piston));
    assert!(world.should_collide(payload_circle, piston));
    assert!(world.should_collide(payload_box, rails[0]));
    assert!(world.should_collide(payload_circle, rails[1]));
    assert!(world.should_collide(payload_box, payload_circle));
    assert!(world.should_collide(payload_box, crank));

    assert!(!world.should_collide(rails[0], rails[1]));
    assert!(!world.should_collide(rails[0], piston));
    assert!(!world.should_collide(rails[1], crank));
}

#[test]
fn payload_filter_bits() {
    let plan = PistonScenario::new().with_payload(1).plan(BULLETS).unwrap();
    let payload_filters: Vec<CollisionFilter> = plan
        .steps()
        .iter()
        .filter_map(|step| match step {
            PlanStep::Body(body) if body.label == label::PAYLOAD_CIRCLE => {
                Some(body.shapes[0].filter)
            }
            _ => None,
        })
        .collect();
    assert_eq!(payload_filters.len(), 1);
    assert_eq!(payload_filters[0].category, category::PAYLOAD);
    assert_eq!(payload_filters[0].mask, CollisionBits(0b111));
}

#[test]
fn fresh_worlds_evolve_identically() {
    let s = PistonScenario::new().with_payload(10);
    let params = StepParams::default();

    let run = || {
        let (mut world, built) = build(&s, BULLETS);
        for _ in 0..60 {
            world.step(&params).unwrap();
        }
        built
            .bodies
            .iter()
            .map(|b| world.body_position(b.id).unwrap())
            .collect::<Vec<_>>()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    // The crank motor actually drives the mechanism.
    let (world, built) = build(&s, BULLETS);
    let start = world.body_position(built.body(label::PISTON).unwrap()).unwrap();
    assert_ne!(first[5], start);
}

#[test]
fn crank_motor_drives_the_mechanism_at_target_speed() {
    let s = PistonScenario::new().with_payload(0);
    let (mut world, built) = build(&s, NO_BULLETS);
    let crank = built.body(label::CRANK).unwrap();
    let params = StepParams::default();

    let mut speeds = Vec::new();
    for frame in 0..240 {
        world.step(&params).unwrap();
        if frame >= 60 {
            speeds.push(world.angular_velocity(crank).unwrap());
        }
    }
    let mean = speeds.iter().sum::<f32>() / speeds.len() as f32;
    assert!(
        (mean - std::f32::consts::PI).abs() < 0.1 * std::f32::consts::PI,
        "mean crank speed {mean}"
    );
}

// ─── Validation Tests ─────────────────────────────────────────

fn unit_box(density: f32) -> ShapeDef {
    ShapeDef::new(
        Shape::Box {
            half_width: 0.5,
            half_height: 0.5,
        },
        density,
    )
}

#[test]
fn joint_to_unbuilt_body_fails_before_construction() {
    let mut plan = ScenarioPlan::new(WorldDef::default());
    let ground = plan.add_body("ground", BodyDef::fixed(Vec2::ZERO), vec![]);
    plan.add_joint("early", RevoluteJointDef::new(ground, BodyKey(1), Vec2::ZERO));
    plan.add_body("late", BodyDef::dynamic(Vec2::Y), vec![unit_box(1.0)]);

    let err = plan.validate().unwrap_err();
    assert!(matches!(err, FramebenchError::ScenarioConstruction(_)));
    assert!(err.to_string().contains("unbuilt body #1"));

    let mut world = RapierEngine::new().create_world(plan.world());
    assert!(plan.instantiate(&mut world).is_err());
    assert_eq!(world.body_count(), 0);
}

#[test]
fn dynamic_body_requires_positive_density() {
    let mut plan = ScenarioPlan::new(WorldDef::default());
    plan.add_body("wall", BodyDef::fixed(Vec2::ZERO), vec![unit_box(0.0)]);
    assert!(plan.validate().is_ok());

    plan.add_body("crate", BodyDef::dynamic(Vec2::Y), vec![unit_box(0.0)]);
    let err = plan.validate().unwrap_err();
    assert!(err.to_string().contains("positive density"));
}

#[test]
fn self_joints_and_multi_bit_categories_are_rejected() {
    let mut plan = ScenarioPlan::new(WorldDef::default());
    let a = plan.add_body("a", BodyDef::dynamic(Vec2::ZERO), vec![unit_box(1.0)]);
    plan.add_joint("loop", RevoluteJointDef::new(a, a, Vec2::ZERO));
    assert!(plan.validate().is_err());

    let mut plan = ScenarioPlan::new(WorldDef::default());
    let filter = CollisionFilter::new(CollisionBits(0b11), CollisionBits::ALL);
    plan.add_body("b", BodyDef::dynamic(Vec2::ZERO), vec![unit_box(1.0).with_filter(filter)]);
    assert!(plan.validate().is_err());
}
