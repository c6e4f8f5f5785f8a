//! Benchmark cases — the capability interface the harness drives.

use std::time::{Duration, Instant};

use framebench_engine::config::StepParams;
use framebench_engine::world::{SimulationEngine, SimulationWorld};
use framebench_scenario::builder::ScenarioBuilder;
use framebench_scenario::plan::BuiltScenario;
use framebench_types::{FramebenchResult, VariantIndex};

use crate::config::BenchmarkConfig;
use crate::metrics::TrialResult;

/// A named set of variants the harness can run trials of.
///
/// `Sync` so that trials may be distributed across worker threads.
pub trait BenchmarkCase: Sync {
    /// Number of variants, indexed `0..variant_count()`.
    fn variant_count(&self) -> usize;

    /// Human-readable name of `variant`.
    fn name(&self, variant: VariantIndex) -> String;

    /// Frames stepped per trial of `variant`.
    fn frame_count(&self, variant: VariantIndex, config: &BenchmarkConfig) -> u32;

    /// Runs one isolated trial: build a fresh scenario, then step it under a
    /// timer. Only stepping is timed.
    fn build_and_run(
        &self,
        variant: VariantIndex,
        config: &BenchmarkConfig,
    ) -> FramebenchResult<TrialResult>;
}

/// Steps `world` exactly `frames` times and returns the elapsed time.
///
/// The loop body is nothing but the step call. On failure the partial
/// elapsed time is dropped with the error.
pub fn time_steps<W: SimulationWorld>(
    world: &mut W,
    params: &StepParams,
    frames: u32,
) -> FramebenchResult<Duration> {
    let start = Instant::now();
    for _ in 0..frames {
        world.step(params)?;
    }
    Ok(start.elapsed())
}

/// A benchmark case made of an engine and a scenario builder.
pub struct ScenarioCase<E, B> {
    engine: E,
    builder: B,
}

impl<E: SimulationEngine, B: ScenarioBuilder> ScenarioCase<E, B> {
    pub fn new(engine: E, builder: B) -> Self {
        Self { engine, builder }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Builds a fresh world for `variant` without stepping it.
    ///
    /// The returned handles belong to the returned world only.
    pub fn build(&self, variant: VariantIndex) -> FramebenchResult<(E::World, BuiltScenario)> {
        let plan = self.builder.plan(variant)?;
        let mut world = self.engine.create_world(plan.world());
        let built = plan.instantiate(&mut world)?;
        Ok((world, built))
    }
}

impl<E: SimulationEngine, B: ScenarioBuilder> BenchmarkCase for ScenarioCase<E, B> {
    fn variant_count(&self) -> usize {
        self.builder.variant_count()
    }

    fn name(&self, variant: VariantIndex) -> String {
        self.builder.variant_name(variant)
    }

    fn frame_count(&self, variant: VariantIndex, config: &BenchmarkConfig) -> u32 {
        self.builder
            .frame_count(variant)
            .unwrap_or(config.frame_count)
    }

    fn build_and_run(
        &self,
        variant: VariantIndex,
        config: &BenchmarkConfig,
    ) -> FramebenchResult<TrialResult> {
        let frame_count = self.frame_count(variant, config);
        let params = config.step_params();

        // The world and its handles are dropped when this trial returns.
        let (mut world, _built) = self.build(variant)?;
        let elapsed = time_steps(&mut world, &params, frame_count)?;

        Ok(TrialResult {
            variant,
            elapsed,
            frame_count,
        })
    }
}
