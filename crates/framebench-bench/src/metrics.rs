//! Benchmark metrics — per-trial results and their aggregation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use framebench_types::constants::MILLIS_PER_SECOND;
use framebench_types::{FramebenchError, FramebenchResult, VariantIndex};

/// Timing of one successful trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub variant: VariantIndex,
    /// Wall-clock time spent stepping.
    pub elapsed: Duration,
    /// Frames stepped.
    pub frame_count: u32,
}

impl TrialResult {
    /// Elapsed time in milliseconds.
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * MILLIS_PER_SECOND
    }
}

/// Statistics of one variant.
///
/// Undefined figures are `None`, never zero or NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub variant: VariantIndex,
    pub variant_name: String,
    /// Frames stepped per trial.
    pub frame_count: u32,
    pub successful_trials: u32,
    pub failed_trials: u32,
    /// Mean elapsed time of successful trials (ms). `None` with no data.
    pub average_millis_per_run: Option<f64>,
    /// `1000 / average_millis_per_run`. `None` when undefined.
    pub frames_per_second: Option<f64>,
    /// `frame_count * 1000 / average_millis_per_run`. `None` when undefined.
    pub steps_per_second: Option<f64>,
}

impl AggregateStats {
    /// Returns true if at least one trial succeeded.
    pub fn has_data(&self) -> bool {
        self.average_millis_per_run.is_some()
    }

    /// Average milliseconds per run, or `StatisticsUndefined`.
    pub fn average_millis(&self) -> FramebenchResult<f64> {
        self.average_millis_per_run
            .ok_or_else(|| self.undefined("no successful trials"))
    }

    /// Frames per second, or `StatisticsUndefined`.
    pub fn fps(&self) -> FramebenchResult<f64> {
        self.average_millis()?;
        self.frames_per_second
            .ok_or_else(|| self.undefined("zero frames or zero average time"))
    }

    fn undefined(&self, reason: &str) -> FramebenchError {
        FramebenchError::StatisticsUndefined {
            variant: self.variant_name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Reduces the successful trials of one variant to statistics.
///
/// `failed_trials` counts trials whose timing was discarded. No outlier
/// rejection is applied.
pub fn aggregate(
    variant: VariantIndex,
    variant_name: impl Into<String>,
    frame_count: u32,
    trials: &[TrialResult],
    failed_trials: u32,
) -> AggregateStats {
    let average = if trials.is_empty() {
        None
    } else {
        let total: f64 = trials.iter().map(TrialResult::elapsed_millis).sum();
        Some(total / trials.len() as f64)
    };

    let per_second = |scale: f64| {
        average
            .filter(|&avg| avg > 0.0 && frame_count > 0)
            .map(|avg| scale * MILLIS_PER_SECOND / avg)
    };

    AggregateStats {
        variant,
        variant_name: variant_name.into(),
        frame_count,
        successful_trials: trials.len() as u32,
        failed_trials,
        average_millis_per_run: average,
        frames_per_second: per_second(1.0),
        steps_per_second: per_second(f64::from(frame_count)),
    }
}

/// Statistics of every variant in a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarnessReport {
    pub stats: Vec<AggregateStats>,
}

impl HarnessReport {
    /// Returns true if any variant ended with zero successful trials.
    pub fn has_missing_data(&self) -> bool {
        self.stats.iter().any(|s| !s.has_data())
    }

    /// Names of variants without data.
    pub fn variants_without_data(&self) -> Vec<&str> {
        self.stats
            .iter()
            .filter(|s| !s.has_data())
            .map(|s| s.variant_name.as_str())
            .collect()
    }

    /// Plain-text table: test name, average milliseconds, runs per second
    /// (`frames_per_second`) and simulated steps per second.
    pub fn to_table(&self) -> String {
        let width = self
            .stats
            .iter()
            .map(|s| s.variant_name.len())
            .max()
            .unwrap_or(0)
            .max("Test Name".len());
        let rate = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"));

        let mut out = format!(
            "{:<width$}  {:>20}  {:>16}  {:>16}",
            "Test Name", "Milliseconds Avg", "Runs/s (FPS)", "Steps/s"
        );
        for s in &self.stats {
            let avg = s
                .average_millis_per_run
                .map_or_else(|| "no data".to_string(), |v| format!("{v:.4}"));
            let fps = rate(s.frames_per_second);
            let steps = rate(s.steps_per_second);
            out.push('\n');
            out.push_str(&format!(
                "{:<width$}  {avg:>20}  {fps:>16}  {steps:>16}",
                s.variant_name
            ));
        }
        out
    }

    /// CSV header row.
    pub fn to_csv_header() -> String {
        "variant,name,frames,successful_trials,failed_trials,avg_ms,fps,steps_per_second"
            .to_string()
    }

    /// Full CSV (header + one row per variant). Undefined values are empty.
    pub fn to_csv(&self) -> String {
        let opt = |v: Option<f64>| v.map(|v| format!("{v:.6}")).unwrap_or_default();
        let mut csv = Self::to_csv_header();
        for s in &self.stats {
            csv.push('\n');
            csv.push_str(&format!(
                "{},\"{}\",{},{},{},{},{},{}",
                s.variant.0,
                s.variant_name.replace('"', "\"\""),
                s.frame_count,
                s.successful_trials,
                s.failed_trials,
                opt(s.average_millis_per_run),
                opt(s.frames_per_second),
                opt(s.steps_per_second),
            ));
        }
        csv
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> FramebenchResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FramebenchError::Serialization(e.to_string()))
    }
}
