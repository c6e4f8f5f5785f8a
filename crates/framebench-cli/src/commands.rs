//! CLI command implementations.

use clap::Args;

use framebench_bench::{BenchmarkCase, BenchmarkConfig, HarnessReport, ScenarioCase, TimingHarness};
use framebench_engine::world::SimulationEngine;
use framebench_engine::RapierEngine;
use framebench_scenario::piston::DEFAULT_PAYLOAD_PER_KIND;
use framebench_scenario::PistonScenario;
use framebench_telemetry::{EventBus, TracingSink};
use framebench_types::VariantIndex;

/// Options of the `piston` command. Flags override the config file.
#[derive(Args, Debug)]
pub struct PistonArgs {
    /// Benchmark config (TOML). Missing fields take their defaults.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Measured trials per variant.
    #[arg(short, long)]
    pub trials: Option<u32>,

    /// Frames stepped per trial.
    #[arg(short, long)]
    pub frames: Option<u32>,

    /// Warm-up trials discarded before measuring.
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Worker threads distributing the trials.
    #[arg(short, long)]
    pub workers: Option<u32>,

    /// Run a single variant (0 = bullets, 1 = no bullets).
    #[arg(long)]
    pub variant: Option<u32>,

    /// Payload bodies per shape kind.
    #[arg(long, default_value_t = DEFAULT_PAYLOAD_PER_KIND)]
    pub payload: u32,

    /// Write the results as CSV to this path.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the results as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl PistonArgs {
    /// Resolves the run config: file (or defaults), then flag overrides.
    fn benchmark_config(&self) -> Result<BenchmarkConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BenchmarkConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trial_count = trials;
        }
        if let Some(frames) = self.frames {
            config.frame_count = frames;
        }
        if let Some(warmup) = self.warmup {
            config.warmup_trials = warmup;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        Ok(config)
    }
}

fn load_config(path: &str) -> Result<BenchmarkConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config: BenchmarkConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Run the piston benchmark.
///
/// Returns `Ok(false)` when any variant ended without a single successful
/// trial.
pub fn piston(args: &PistonArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = args.benchmark_config()?;
    let engine = RapierEngine::new();
    let case = ScenarioCase::new(engine, PistonScenario::new().with_payload(args.payload));

    if let Some(v) = args.variant {
        if v as usize >= case.variant_count() {
            return Err(format!(
                "Unknown variant: {v}. Available: 0..{}",
                case.variant_count()
            )
            .into());
        }
    }

    if !args.json {
        println!("framebench — piston");
        println!("═══════════════════");
        println!(
            "Engine: {}  trials: {}  frames: {}  warm-up: {}  workers: {}  payload: {}",
            case.engine().name(),
            config.trial_count,
            case.frame_count(VariantIndex(0), &config),
            config.warmup_trials,
            config.workers,
            args.payload,
        );
        println!();
    }

    let mut harness =
        TimingHarness::new(config)?.with_bus(EventBus::new().with_sink(TracingSink::new()));

    let report = match args.variant {
        Some(v) => {
            let stats = harness.run_variant(&case, VariantIndex(v));
            if let Some(mut bus) = harness.take_bus() {
                bus.finish();
            }
            HarnessReport { stats: vec![stats] }
        }
        None => harness.run(&case),
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_table());
    }

    if let Some(path) = &args.output {
        std::fs::write(path, report.to_csv())?;
        if !args.json {
            println!();
            println!("Results written to: {path}");
        }
    }

    let missing = report.variants_without_data();
    if !missing.is_empty() {
        eprintln!("No successful trials for: {}", missing.join(", "));
        return Ok(false);
    }
    Ok(true)
}

/// Validate a benchmark config file.
pub fn validate(path: &str) -> Result<bool, Box<dyn std::error::Error>> {
    println!("framebench config validator");
    println!("───────────────────────────");
    println!();

    let config = load_config(path)?;
    config.validate()?;

    println!("Config: {path}");
    println!("  Trials:          {}", config.trial_count);
    println!("  Frames:          {}", config.frame_count);
    println!("  Timestep:        {:.6}s", config.timestep);
    println!("  Velocity iters:  {}", config.velocity_iterations);
    println!("  Position iters:  {}", config.position_iterations);
    println!("  Warm-up:         {}", config.warmup_trials);
    println!("  Workers:         {}", config.workers);
    println!();
    println!("✅ Config is valid.");
    Ok(true)
}
