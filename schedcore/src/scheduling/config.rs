use serde::{Deserialize, Serialize};

/// Configuration of a scheduling pass.
///
/// The rounding precision for the overlap comparison is an instrument
/// property (mobility resolution of the quad isolation), so it is carried
/// here per pass instead of being hard-coded.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Decimal digits (in 1/K0) that mobility window bounds are rounded to
    /// before the overlap comparison.
    pub mobility_decimals: u32,
    /// Maximum number of precursors scheduled per batch. Candidates are
    /// ranked by intensity and truncated to this count before the pass.
    pub max_precursors: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            // Two decimals in 1/K0, the resolution limit of quad switching
            mobility_decimals: 2,

            // Batch size of the acquisition queue
            max_precursors: 20,
        }
    }
}

impl SchedulerConfig {
    pub fn new(mobility_decimals: u32, max_precursors: usize) -> Self {
        Self { mobility_decimals, max_precursors }
    }
}
