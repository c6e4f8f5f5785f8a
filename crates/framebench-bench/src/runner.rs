//! Timing harness — runs trials of every variant and aggregates them.

use std::thread;

use framebench_telemetry::{BenchEvent, EventBus, EventKind};
use framebench_types::{FramebenchResult, VariantIndex};

use crate::case::BenchmarkCase;
use crate::config::BenchmarkConfig;
use crate::metrics::{aggregate, AggregateStats, HarnessReport, TrialResult};

/// Outcome of one trial, keyed by its index within the variant.
type TrialOutcome = (u32, Result<TrialResult, String>);

/// Drives a [`BenchmarkCase`] under a fixed [`BenchmarkConfig`].
pub struct TimingHarness {
    config: BenchmarkConfig,
    bus: Option<EventBus>,
}

impl TimingHarness {
    /// Creates a harness after validating `config`.
    pub fn new(config: BenchmarkConfig) -> FramebenchResult<Self> {
        config.validate()?;
        Ok(Self { config, bus: None })
    }

    /// Attaches an event bus that receives per-trial events.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Detaches and returns the event bus, if any.
    pub fn take_bus(&mut self) -> Option<EventBus> {
        self.bus.take()
    }

    /// Runs every variant of `case` in index order.
    ///
    /// A variant whose trials all fail still appears in the report, with
    /// undefined statistics.
    pub fn run(&mut self, case: &dyn BenchmarkCase) -> HarnessReport {
        let stats = VariantIndex::all(case.variant_count())
            .map(|variant| self.run_variant(case, variant))
            .collect();
        if let Some(bus) = self.bus.as_mut() {
            bus.finish();
        }
        HarnessReport { stats }
    }

    /// Runs warm-up and measured trials of one variant.
    pub fn run_variant(&mut self, case: &dyn BenchmarkCase, variant: VariantIndex) -> AggregateStats {
        let name = case.name(variant);
        let frame_count = case.frame_count(variant, &self.config);
        tracing::info!(
            variant = variant.0,
            name = %name,
            trials = self.config.trial_count,
            frames = frame_count,
            "running variant"
        );

        for trial in 0..self.config.warmup_trials {
            let kind = match case.build_and_run(variant, &self.config) {
                Ok(result) => EventKind::WarmupDiscarded {
                    trial,
                    elapsed_ms: result.elapsed_millis(),
                },
                Err(e) => EventKind::WarmupFailed {
                    trial,
                    reason: e.to_string(),
                },
            };
            self.emit(variant, kind);
        }

        let outcomes = if self.config.workers > 1 {
            run_parallel(case, variant, &self.config)
        } else {
            (0..self.config.trial_count)
                .map(|trial| {
                    let outcome = case
                        .build_and_run(variant, &self.config)
                        .map_err(|e| e.to_string());
                    (trial, outcome)
                })
                .collect()
        };

        let mut successful = Vec::with_capacity(outcomes.len());
        let mut failed = 0u32;
        for (trial, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    self.emit(
                        variant,
                        EventKind::TrialCompleted {
                            trial,
                            elapsed_ms: result.elapsed_millis(),
                            frames: result.frame_count,
                        },
                    );
                    successful.push(result);
                }
                Err(reason) => {
                    failed += 1;
                    self.emit(variant, EventKind::TrialFailed { trial, reason });
                }
            }
        }

        let stats = aggregate(variant, name, frame_count, &successful, failed);
        if !stats.has_data() {
            tracing::warn!(variant = variant.0, name = %stats.variant_name, "no successful trials");
        }
        self.emit(
            variant,
            EventKind::VariantAggregated {
                name: stats.variant_name.clone(),
                average_ms: stats.average_millis_per_run,
                frames_per_second: stats.frames_per_second,
                successful: stats.successful_trials,
                failed: stats.failed_trials,
            },
        );
        if let Some(bus) = self.bus.as_mut() {
            bus.flush();
        }
        stats
    }

    fn emit(&self, variant: VariantIndex, kind: EventKind) {
        if let Some(bus) = &self.bus {
            bus.emit(BenchEvent::new(variant.0, kind));
        }
    }
}

/// Distributes measured trials round-robin over `config.workers` threads.
///
/// Every trial still builds its own world; nothing is shared between
/// workers except the read-only case and config. A panicking worker marks
/// all of its trials failed.
fn run_parallel(
    case: &dyn BenchmarkCase,
    variant: VariantIndex,
    config: &BenchmarkConfig,
) -> Vec<TrialOutcome> {
    let workers = config.workers.min(config.trial_count).max(1);

    let mut outcomes: Vec<TrialOutcome> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let handle = scope.spawn(move || {
                    (worker..config.trial_count)
                        .step_by(workers as usize)
                        .map(|trial| {
                            let outcome = case
                                .build_and_run(variant, config)
                                .map_err(|e| e.to_string());
                            (trial, outcome)
                        })
                        .collect::<Vec<_>>()
                });
                (worker, handle)
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|(worker, handle)| match handle.join() {
                Ok(outcomes) => outcomes,
                Err(_) => (worker..config.trial_count)
                    .step_by(workers as usize)
                    .map(|trial| (trial, Err(format!("worker {worker} panicked"))))
                    .collect(),
            })
            .collect()
    });

    outcomes.sort_by_key(|(trial, _)| *trial);
    outcomes
}

/// Runs `case` with a fresh harness and no event bus.
pub fn run(case: &dyn BenchmarkCase, config: BenchmarkConfig) -> FramebenchResult<HarnessReport> {
    Ok(TimingHarness::new(config)?.run(case))
}
