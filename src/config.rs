//! The benchmark grid and the fixed on-disk layout.
//!
//! The grid is compiled in: changing which core counts were measured, or how
//! many times each was repeated, means editing the constants below. Paths
//! are defaults only so tests (and reruns from elsewhere) can point the
//! collector at a different tree.

use crate::Result;
use anyhow::bail;

/// Core counts measured on COSMA8, ascending. The first entry is the
/// baseline for normalization and for the ideal-scaling curve.
pub const DEFAULT_CORES: [u32; 5] = [128, 256, 512, 1024, 2048];

/// Trials per core count, in the order their directories are read.
pub const DEFAULT_TRIALS: [u32; 3] = [1, 2, 3];

/// Where the per-run outputs live, relative to the working directory:
/// `<outputs>/n<cores>/<trial>/timer.0*`.
pub const DEFAULT_OUTPUTS_DIR: &str = "COSMA8/outputs";

/// Default chart location, overwritten on every run.
pub const DEFAULT_CHART_PATH: &str = "bam_strong_scaling.png";

/// The benchmark grid: which core counts were run, and which trials exist
/// for each of them.
#[derive(Debug, Clone)]
pub struct RunMatrix {
    pub cores: Vec<u32>,
    pub trials: Vec<u32>,
}

impl Default for RunMatrix {
    fn default() -> Self {
        Self {
            cores: DEFAULT_CORES.to_vec(),
            trials: DEFAULT_TRIALS.to_vec(),
        }
    }
}

impl RunMatrix {
    /// Check the grid is usable before any filesystem work:
    /// - at least one core count and at least one trial
    /// - core counts nonzero and strictly ascending (the first one is the
    ///   baseline everything else is normalized against)
    pub fn validate(&self) -> Result<()> {
        if self.cores.is_empty() {
            bail!("run matrix has no core counts");
        }
        if self.trials.is_empty() {
            bail!("run matrix has no trials");
        }
        if self.cores[0] == 0 {
            bail!("core count 0 is not a valid run size");
        }
        for pair in self.cores.windows(2) {
            if pair[0] >= pair[1] {
                bail!(
                    "core counts must be strictly ascending: {} listed before {}",
                    pair[0],
                    pair[1]
                );
            }
        }
        Ok(())
    }
}
