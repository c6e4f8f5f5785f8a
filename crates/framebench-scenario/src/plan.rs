//! Scenario plans — ordered body/shape/joint declarations.
//!
//! A plan never touches an engine until [`ScenarioPlan::instantiate`] is
//! called. Joints refer to bodies through [`BodyKey`]s, which are mapped to
//! the world's own handles during instantiation. Handles are returned in a
//! [`BuiltScenario`] owned by the caller for the duration of one trial.

use serde::{Deserialize, Serialize};

use framebench_engine::defs::{BodyDef, BodyType, JointDef, ShapeDef, WorldDef};
use framebench_engine::world::SimulationWorld;
use framebench_types::{BodyId, FramebenchError, FramebenchResult, JointId};

/// Declaration-order key of a body inside a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyKey(pub u32);

impl BodyKey {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A body declaration with its shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPlan {
    /// Role label, e.g. `"crank"`. Several bodies may share a label.
    pub label: &'static str,
    pub def: BodyDef,
    pub shapes: Vec<ShapeDef>,
}

/// A joint declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPlan {
    pub label: &'static str,
    pub def: JointDef<BodyKey>,
}

/// One construction step, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    Body(BodyPlan),
    Joint(JointPlan),
}

/// An ordered, engine-independent scenario description.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPlan {
    world: WorldDef,
    steps: Vec<PlanStep>,
    body_count: u32,
}

impl ScenarioPlan {
    /// Creates an empty plan for a world with the given parameters.
    pub fn new(world: WorldDef) -> Self {
        Self {
            world,
            steps: Vec::new(),
            body_count: 0,
        }
    }

    /// Declares a body and returns its key.
    pub fn add_body(
        &mut self,
        label: &'static str,
        def: BodyDef,
        shapes: Vec<ShapeDef>,
    ) -> BodyKey {
        let key = BodyKey(self.body_count);
        self.body_count += 1;
        self.steps.push(PlanStep::Body(BodyPlan {
            label,
            def,
            shapes,
        }));
        key
    }

    /// Declares a joint between two previously declared bodies.
    pub fn add_joint(&mut self, label: &'static str, def: impl Into<JointDef<BodyKey>>) {
        self.steps.push(PlanStep::Joint(JointPlan {
            label,
            def: def.into(),
        }));
    }

    /// World parameters.
    pub fn world(&self) -> &WorldDef {
        &self.world
    }

    /// Construction steps in execution order.
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Number of declared bodies.
    pub fn body_count(&self) -> usize {
        self.body_count as usize
    }

    /// Number of declared joints.
    pub fn joint_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, PlanStep::Joint(_)))
            .count()
    }

    /// Checks the whole plan without touching an engine.
    ///
    /// Rejects:
    /// - joints referencing a body not declared before them
    /// - joints connecting a body to itself
    /// - degenerate shapes and prismatic axes
    /// - non-positive density on shapes of dynamic bodies
    /// - negative density or friction anywhere
    /// - filter categories that are not exactly one bit
    pub fn validate(&self) -> FramebenchResult<()> {
        let mut declared = 0u32;
        for (position, step) in self.steps.iter().enumerate() {
            match step {
                PlanStep::Body(body) => {
                    validate_body(declared, body)?;
                    declared += 1;
                }
                PlanStep::Joint(joint) => {
                    let (a, b) = joint.def.bodies();
                    for key in [a, b] {
                        if key.0 >= declared {
                            return Err(FramebenchError::construction(format!(
                                "joint '{}' (step {position}) references unbuilt body #{}",
                                joint.label, key.0
                            )));
                        }
                    }
                    if a == b {
                        return Err(FramebenchError::construction(format!(
                            "joint '{}' connects body #{} to itself",
                            joint.label, a.0
                        )));
                    }
                    if let JointDef::Prismatic(def) = &joint.def {
                        if !(def.axis.is_finite() && def.axis.length_squared() > 0.0) {
                            return Err(FramebenchError::construction(format!(
                                "joint '{}' has a degenerate axis",
                                joint.label
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Validates the plan, then builds it into `world` in declaration order.
    ///
    /// Nothing is created if validation fails.
    pub fn instantiate<W: SimulationWorld>(&self, world: &mut W) -> FramebenchResult<BuiltScenario> {
        self.validate()?;

        let mut built = BuiltScenario {
            bodies: Vec::with_capacity(self.body_count()),
            joints: Vec::new(),
        };

        for step in &self.steps {
            match step {
                PlanStep::Body(body) => {
                    let id = world.create_body(&body.def)?;
                    for shape in &body.shapes {
                        world.attach_shape(id, shape)?;
                    }
                    built.bodies.push(BuiltBody {
                        label: body.label,
                        id,
                        body_type: body.def.body_type,
                        bullet: body.def.bullet,
                    });
                }
                PlanStep::Joint(joint) => {
                    let def = joint.def.try_map_bodies(|key| {
                        built.bodies.get(key.index()).map(|b| b.id).ok_or_else(|| {
                            FramebenchError::construction(format!("unbuilt body #{}", key.0))
                        })
                    })?;
                    let id = world.create_joint(&def)?;
                    built.joints.push(BuiltJoint {
                        label: joint.label,
                        id,
                    });
                }
            }
        }

        Ok(built)
    }
}

fn validate_body(key: u32, body: &BodyPlan) -> FramebenchResult<()> {
    for shape in &body.shapes {
        if !shape.shape.is_valid() {
            return Err(FramebenchError::construction(format!(
                "body '{}' #{key} has a degenerate shape {:?}",
                body.label, shape.shape
            )));
        }
        if !shape.density.is_finite() || shape.density < 0.0 {
            return Err(FramebenchError::construction(format!(
                "body '{}' #{key} has invalid density {}",
                body.label, shape.density
            )));
        }
        if body.def.body_type == BodyType::Dynamic && shape.density <= 0.0 {
            return Err(FramebenchError::construction(format!(
                "dynamic body '{}' #{key} requires a positive density",
                body.label
            )));
        }
        if !shape.friction.is_finite() || shape.friction < 0.0 {
            return Err(FramebenchError::construction(format!(
                "body '{}' #{key} has invalid friction {}",
                body.label, shape.friction
            )));
        }
        if !shape.filter.category.is_single() {
            return Err(FramebenchError::construction(format!(
                "body '{}' #{key} has category bits {:#06x}, expected a single bit",
                body.label,
                shape.filter.category.bits()
            )));
        }
    }
    Ok(())
}

/// A body created by [`ScenarioPlan::instantiate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltBody {
    pub label: &'static str,
    pub id: BodyId,
    pub body_type: BodyType,
    pub bullet: bool,
}

/// A joint created by [`ScenarioPlan::instantiate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltJoint {
    pub label: &'static str,
    pub id: JointId,
}

/// Handles produced by one instantiation. Valid only for the world that
/// issued them, and dropped with it at the end of the trial.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltScenario {
    pub bodies: Vec<BuiltBody>,
    pub joints: Vec<BuiltJoint>,
}

impl BuiltScenario {
    /// All bodies carrying `label`, in creation order.
    pub fn bodies_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a BuiltBody> + 'a {
        self.bodies.iter().filter(move |b| b.label == label)
    }

    /// The first body carrying `label`.
    pub fn body(&self, label: &str) -> Option<BodyId> {
        self.bodies.iter().find(|b| b.label == label).map(|b| b.id)
    }

    /// The first joint carrying `label`.
    pub fn joint(&self, label: &str) -> Option<JointId> {
        self.joints.iter().find(|j| j.label == label).map(|j| j.id)
    }
}
