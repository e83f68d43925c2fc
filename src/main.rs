use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use svgplot::{collect_inputs, init_logging, load_config, run, ConfigOverrides};

/// Convert SVG shapes into single-layer extrusion G-code.
///
/// Each input is an .svg file or a directory of them. Output goes to
/// `gcode_output/<name>.gcode` next to each input, with a debug log in
/// `log/<name>.log`.
#[derive(Parser, Debug)]
#[command(name = "svgplot", version = svgplot::LONG_VERSION, about)]
struct Cli {
    /// SVG files or directories to convert
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Config file (.toml or .json); defaults to the platform config location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Curve flatness tolerance (values below 0.1 are raised to 0.1)
    #[arg(long)]
    smoothness: Option<f64>,

    /// Print bed width in mm
    #[arg(long)]
    bed_width: Option<f64>,

    /// Print bed height in mm
    #[arg(long)]
    bed_height: Option<f64>,

    /// Feed rate in mm/min
    #[arg(long)]
    feed_rate: Option<f64>,

    /// Write scaled, flipped bed coordinates instead of source coordinates
    #[arg(long)]
    device_coordinates: bool,

    /// Do not write the per-file debug log
    #[arg(long)]
    no_log: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let mut config = load_config(cli.config.as_deref())?;
    ConfigOverrides {
        smoothness: cli.smoothness,
        bed_width: cli.bed_width,
        bed_height: cli.bed_height,
        feed_rate: cli.feed_rate,
        device_coordinates: cli.device_coordinates,
        no_log: cli.no_log,
    }
    .apply(&mut config)?;

    let files = collect_inputs(&cli.inputs)?;
    let summary = run(&files, &config);

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
