//! Scenario builder trait.

use framebench_types::{FramebenchResult, VariantIndex};

use crate::plan::ScenarioPlan;

/// Describes a family of scenario variants.
///
/// Implementations must be pure: `plan` returns an equal plan every time it
/// is called with the same variant, and keeps no state between calls. The
/// harness calls it once per trial.
pub trait ScenarioBuilder: Sync {
    /// Number of variants, indexed `0..variant_count()`.
    fn variant_count(&self) -> usize;

    /// Human-readable name of `variant`.
    fn variant_name(&self, variant: VariantIndex) -> String;

    /// Frame count override for `variant`. `None` uses the run config.
    fn frame_count(&self, variant: VariantIndex) -> Option<u32> {
        let _ = variant;
        None
    }

    /// Declares the scenario for `variant`. No stepping happens here.
    fn plan(&self, variant: VariantIndex) -> FramebenchResult<ScenarioPlan>;
}
