use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

mod collect;
mod config;
mod render;
mod scaling;
mod timer;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "bam-scaling")]
#[command(about = "Strong-scaling chart for BAM timer outputs", long_about = None)]
struct Cli {
    /// Directory holding the per-run outputs (n<cores>/<trial>/timer.0*).
    #[arg(long, default_value = config::DEFAULT_OUTPUTS_DIR)]
    outputs_dir: PathBuf,

    /// Where to write the chart (overwritten if present).
    #[arg(short = 'o', long, default_value = config::DEFAULT_CHART_PATH)]
    out: PathBuf,

    /// Skip opening the chart in an image viewer after writing it.
    #[arg(long)]
    no_show: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) The benchmark grid is compiled in; check it before touching disk.
    let matrix = config::RunMatrix::default();
    matrix.validate().context("run matrix")?;

    // 2) One evolution time per (core count, trial).
    let times = collect::collect_times(&matrix, &cli.outputs_dir)?;

    // 3) Trial means, normalization, ideal curve, efficiency.
    let report = scaling::build_scaling_report(&matrix, &times)?;

    // 4) Draw the figure and write it out.
    render::render_scaling_chart(&report, &cli.out)?;
    println!("Wrote {}", cli.out.display());

    if !cli.no_show {
        render::show_chart(&cli.out);
    }

    Ok(())
}
