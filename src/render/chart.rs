//! The strong-scaling figure: measured and ideal time on log-log axes, with
//! efficiency as a percentage on a secondary linear axis and one combined
//! legend for both coordinate systems.

use crate::Result;
use crate::scaling::ScalingReport;
use anyhow::Context;
use plotters::coord::combinators::BindKeyPoints;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;
use std::process::Command;

/// Bitmap size in pixels: the 7in x 5in figure at 300 dpi.
pub const CHART_SIZE: (u32, u32) = (2100, 1500);

// Matplotlib "tab" palette, so the figure keeps the colors the run reports
// have always used.
const MEASURED_COLOR: RGBColor = RGBColor(31, 119, 180);
const IDEAL_COLOR: RGBColor = RGBColor(255, 127, 14);
const EFFICIENCY_COLOR: RGBColor = RGBColor(44, 160, 44);

#[cfg(target_os = "macos")]
const VIEWER: &str = "open";
#[cfg(not(target_os = "macos"))]
const VIEWER: &str = "xdg-open";

/// Draw the chart for `report` and write it to `out_path`, overwriting any
/// previous chart.
///
/// Layout mirrors the run reports: log-log primary axes with x ticks pinned
/// to the configured core counts (no minor x grid), the measured curve with
/// circle markers, the ideal curve dashed, and efficiency on a right-hand
/// linear axis labeled in percent.
pub fn render_scaling_chart(report: &ScalingReport, out_path: &Path) -> Result<()> {
    let cores: Vec<f64> = report.cores.iter().map(|&c| f64::from(c)).collect();

    let (x_lo, x_hi) = padded_log_range(&cores, 1.15);
    let time_values: Vec<f64> = report
        .measured
        .iter()
        .chain(&report.ideal)
        .copied()
        .collect();
    let (y_lo, y_hi) = padded_log_range(&time_values, 1.3);
    let eff_top = report.efficiency.iter().fold(1.0f64, |a, &e| a.max(e)) * 1.08;

    let measured: Vec<(f64, f64)> = series_points(&cores, &report.measured);
    let ideal: Vec<(f64, f64)> = series_points(&cores, &report.ideal);
    let efficiency: Vec<(f64, f64)> = series_points(&cores, &report.efficiency);

    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("clear chart canvas for {}", out_path.display()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("BAM Strong Scaling", ("sans-serif", 56))
        .margin(30)
        .x_label_area_size(100)
        .y_label_area_size(130)
        .right_y_label_area_size(130)
        .build_cartesian_2d(
            (x_lo..x_hi).log_scale().with_key_points(cores.clone()),
            (y_lo..y_hi).log_scale(),
        )
        .context("build chart axes")?
        .set_secondary_coord((x_lo..x_hi).log_scale(), 0.0..eff_top);

    chart
        .configure_mesh()
        .x_desc("Number of COSMA8 cores")
        .y_desc("Normalized evolution time")
        .x_labels(report.cores.len())
        .x_label_formatter(&|v| format!("{v:.0}"))
        .label_style(("sans-serif", 34))
        .axis_desc_style(("sans-serif", 42))
        .bold_line_style(BLACK.mix(0.2))
        .light_line_style(BLACK.mix(0.08))
        .draw()
        .context("draw chart mesh")?;

    chart
        .configure_secondary_axes()
        .y_desc("Strong scaling efficiency (%)")
        .y_label_formatter(&|v| format!("{:.0}%", v * 100.0))
        .label_style(("sans-serif", 34))
        .axis_desc_style(("sans-serif", 42))
        .draw()
        .context("draw efficiency axis")?;

    chart
        .draw_series(LineSeries::new(
            measured.iter().copied(),
            MEASURED_COLOR.stroke_width(4),
        ))
        .context("draw measured series")?
        .label("Measured")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 40, y)], MEASURED_COLOR.stroke_width(4))
        });
    chart
        .draw_series(
            measured
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 9, MEASURED_COLOR.filled())),
        )
        .context("draw measured markers")?;

    chart
        .draw_series(DashedLineSeries::new(
            ideal.iter().copied(),
            12,
            9,
            IDEAL_COLOR.stroke_width(4),
        ))
        .context("draw ideal series")?
        .label("Ideal scaling")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], IDEAL_COLOR.stroke_width(4)));

    chart
        .draw_secondary_series(LineSeries::new(
            efficiency.iter().copied(),
            EFFICIENCY_COLOR.stroke_width(4),
        ))
        .context("draw efficiency series")?
        .label("Efficiency")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 40, y)], EFFICIENCY_COLOR.stroke_width(4))
        });
    chart
        .draw_secondary_series(efficiency.iter().map(|&(x, y)| {
            EmptyElement::at((x, y)) + Rectangle::new([(-8, -8), (8, 8)], EFFICIENCY_COLOR.filled())
        }))
        .context("draw efficiency markers")?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 36))
        .draw()
        .context("draw chart legend")?;

    root.present()
        .with_context(|| format!("write chart to {}", out_path.display()))?;

    Ok(())
}

/// Open the rendered chart in the platform image viewer and wait for it to
/// close. Preview only: the chart is already on disk, so a missing viewer
/// is a warning rather than an error.
pub fn show_chart(path: &Path) {
    match Command::new(VIEWER).arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => {
            eprintln!("WARN: {} {} exited with {}", VIEWER, path.display(), status);
        }
        Err(err) => {
            eprintln!(
                "WARN: could not launch {} for {}: {}",
                VIEWER,
                path.display(),
                err
            );
        }
    }
}

fn series_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

/// Multiplicative padding around the data so edge points stay inside the
/// plot area of a log axis.
fn padded_log_range(values: &[f64], factor: f64) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo / factor, hi * factor)
}
