//! Strong-scaling arithmetic: trial means, normalization, the ideal curve,
//! and per-point efficiency.

use crate::Result;
use crate::collect::TimesByCore;
use crate::config::RunMatrix;
use anyhow::{Context, bail};

/// Chart-ready series, aligned index-by-index with `cores`.
#[derive(Debug, Clone)]
pub struct ScalingReport {
    pub cores: Vec<u32>,
    /// Mean time per core count, normalized so the smallest count is 1.0.
    pub measured: Vec<f64>,
    /// Closed-form ideal: time halves every time the core count doubles.
    pub ideal: Vec<f64>,
    /// ideal / measured per core count, as a fraction of 1.0.
    pub efficiency: Vec<f64>,
}

/// Arithmetic mean of `values`. An empty slice is an error, not NaN.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        bail!("cannot compute mean of empty list");
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Ideal strong scaling relative to the first core count:
/// `base_time * (cores[0] / c)` for each count `c`.
pub fn ideal_scaling_line(cores: &[u32], base_time: f64) -> Vec<f64> {
    let baseline = match cores.first() {
        Some(&c) => f64::from(c),
        None => return Vec::new(),
    };
    cores
        .iter()
        .map(|&c| base_time * baseline / f64::from(c))
        .collect()
}

/// Collapse the per-trial times into the chart series.
///
/// Means are taken in matrix order and normalized by the smallest core
/// count's mean, so the measured series starts at 1.0 by construction and
/// the ideal curve is the inverse line from that same baseline.
pub fn build_scaling_report(matrix: &RunMatrix, times: &TimesByCore) -> Result<ScalingReport> {
    let mut means = Vec::with_capacity(matrix.cores.len());
    for &cores in &matrix.cores {
        let trials = match times.get(&cores) {
            Some(t) => t,
            None => bail!("no collected times for {} cores", cores),
        };
        let m = mean(trials).with_context(|| format!("mean time for {} cores", cores))?;
        means.push(m);
    }

    let baseline = match means.first() {
        Some(&m) => m,
        None => bail!("run matrix has no core counts"),
    };

    let measured: Vec<f64> = means.iter().map(|m| m / baseline).collect();
    let ideal = ideal_scaling_line(&matrix.cores, 1.0);
    let efficiency: Vec<f64> = ideal.iter().zip(&measured).map(|(i, m)| i / m).collect();

    Ok(ScalingReport {
        cores: matrix.cores.clone(),
        measured,
        ideal,
        efficiency,
    })
}
