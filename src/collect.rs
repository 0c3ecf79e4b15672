//! Locating timer files for every (core count, trial) run directory.
//!
//! Runs are laid out as `<outputs>/n<cores>/<trial>/timer.0*`. Each run is
//! expected to leave exactly one timer file; when several match (per-rank
//! output), the lexicographically first one is read and a warning names the
//! choice.

use crate::Result;
use crate::config::RunMatrix;
use crate::timer;
use anyhow::{Context, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Timer files carry this prefix plus a numeric suffix (e.g. `timer.0000`).
pub const TIMER_FILE_PREFIX: &str = "timer.0";

/// Extracted times keyed by core count, one entry per trial in trial order.
pub type TimesByCore = BTreeMap<u32, Vec<f64>>;

/// Walk the whole run matrix and extract one evolution time per
/// (core count, trial). A run without a readable timer file is fatal: a
/// scaling chart with silently missing points would be misleading.
pub fn collect_times(matrix: &RunMatrix, outputs_dir: &Path) -> Result<TimesByCore> {
    let mut times = TimesByCore::new();

    for &cores in &matrix.cores {
        let mut per_core = Vec::with_capacity(matrix.trials.len());
        for &trial in &matrix.trials {
            let run_dir = outputs_dir.join(format!("n{cores}")).join(trial.to_string());
            let timer_path = locate_timer_file(&run_dir)
                .with_context(|| format!("no timer file for {cores} cores, trial {trial}"))?;
            let time = timer::extract_evolve_time(&timer_path)
                .with_context(|| format!("extract time for {cores} cores, trial {trial}"))?;
            per_core.push(time);
        }
        times.insert(cores, per_core);
    }

    Ok(times)
}

/// First `timer.0*` file (lexicographic by name) in a run directory.
fn locate_timer_file(run_dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(run_dir)
        .with_context(|| format!("read run directory {}", run_dir.display()))?;

    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("read run directory {}", run_dir.display()))?;
        if entry.file_name().to_string_lossy().starts_with(TIMER_FILE_PREFIX) {
            matches.push(entry.path());
        }
    }

    if matches.is_empty() {
        bail!(
            "no files matching {}* in {}",
            TIMER_FILE_PREFIX,
            run_dir.display()
        );
    }

    matches.sort();
    if matches.len() > 1 {
        // Per-rank runs can leave one timer file per rank; the chart uses
        // rank 0 but the tree should not be silently truncated.
        eprintln!(
            "WARN: {} timer files in {}, using {}",
            matches.len(),
            run_dir.display(),
            matches[0].display()
        );
    }

    Ok(matches.remove(0))
}
