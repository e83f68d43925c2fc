//! # svgplot
//!
//! Converts SVG drawings into single-layer extrusion G-code for RepRap-style
//! printers and plotters.
//!
//! ## Architecture
//!
//! svgplot is organized as a workspace with multiple crates:
//!
//! 1. **svgplot-core** - Point type and error taxonomy
//! 2. **svgplot-shapes** - Shape adapters, path parsing, curve flattening
//! 3. **svgplot-settings** - Machine profile, G-code templates, conversion options
//! 4. **svgplot-camtools** - SVG import and G-code generation
//! 5. **svgplot** - Command-line binary that ties them together

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

pub use svgplot_camtools as camtools;
pub use svgplot_settings as settings;
pub use svgplot_shapes as shapes;

pub use svgplot_core::{Error, PathError, Point, ShapeError};

pub use svgplot_camtools::{convert_file, ConversionOutput, ExtrusionPlotter, SvgDocument};
pub use svgplot_settings::{Config, OutputCoordinates};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
/// - INFO by default, DEBUG when `verbose`
pub fn init_logging(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Logging was already initialized")?;

    Ok(())
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub smoothness: Option<f64>,
    pub bed_width: Option<f64>,
    pub bed_height: Option<f64>,
    pub feed_rate: Option<f64>,
    pub device_coordinates: bool,
    pub no_log: bool,
}

impl ConfigOverrides {
    /// Apply the overrides and re-validate.
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(smoothness) = self.smoothness {
            config.conversion.smoothness = smoothness;
        }
        if let Some(width) = self.bed_width {
            config.machine.bed_max_x = width;
        }
        if let Some(height) = self.bed_height {
            config.machine.bed_max_y = height;
        }
        if let Some(feed_rate) = self.feed_rate {
            config.machine.feed_rate = feed_rate;
        }
        if self.device_coordinates {
            config.conversion.output_coordinates = OutputCoordinates::Device;
        }
        if self.no_log {
            config.conversion.write_debug_log = false;
        }
        config.validate().context("Invalid command-line option")?;
        Ok(())
    }
}

/// Load `path`, or the platform config (or defaults) when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load_or_default().context("Failed to load config"),
    }
}

/// Expand directories into the `.svg` files they contain (sorted, not
/// recursive); plain files are passed through.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)
                .with_context(|| format!("Failed to read directory {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .and_then(|ext| ext.to_str())
                            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
                })
                .collect();
            found.sort();
            if found.is_empty() {
                warn!("No .svg files in {}", input.display());
            }
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Outcome of converting a batch of files.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub converted: Vec<ConversionOutput>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every file, continuing past failures.
pub fn run(files: &[PathBuf], config: &Config) -> RunSummary {
    let mut summary = RunSummary::default();
    for file in files {
        match convert_file(file, config) {
            Ok(output) => summary.converted.push(output),
            Err(e) => {
                error!("{:#}", e);
                summary.failed.push((file.clone(), e));
            }
        }
    }
    info!(
        "{} file(s) converted, {} failed",
        summary.converted.len(),
        summary.failed.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SQUARE: &str =
        r#"<svg width="20" height="20"><rect x="1" y="1" width="10" height="10"/></svg>"#;

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let overrides = ConfigOverrides {
            smoothness: Some(0.5),
            bed_width: Some(150.0),
            device_coordinates: true,
            no_log: true,
            ..ConfigOverrides::default()
        };
        overrides.apply(&mut config).unwrap();
        assert_eq!(config.conversion.smoothness, 0.5);
        assert_eq!(config.machine.bed_max_x, 150.0);
        assert_eq!(config.machine.bed_max_y, 200.0);
        assert_eq!(config.conversion.output_coordinates, OutputCoordinates::Device);
        assert!(!config.conversion.write_debug_log);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut config = Config::default();
        let overrides = ConfigOverrides {
            feed_rate: Some(-1.0),
            ..ConfigOverrides::default()
        };
        assert!(overrides.apply(&mut config).is_err());
    }

    #[test]
    fn test_long_version_mentions_build_date() {
        assert!(LONG_VERSION.starts_with(VERSION));
        assert!(LONG_VERSION.contains(BUILD_DATE));
    }

    #[test]
    fn test_directory_inputs_expand_to_svg_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.svg"), SQUARE).unwrap();
        fs::write(dir.path().join("a.SVG"), SQUARE).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let files = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.SVG", "b.svg"]);
    }

    #[test]
    fn test_run_continues_past_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.svg");
        let bad = dir.path().join("bad.svg");
        fs::write(&good, SQUARE).unwrap();
        fs::write(&bad, "<svg><rect width='1' height='1'/></svg>").unwrap();
        let missing = dir.path().join("missing.svg");

        let summary = run(&[bad, missing, good], &Config::default());

        assert!(!summary.is_success());
        assert_eq!(summary.failed.len(), 2);
        assert_eq!(summary.converted.len(), 1);
        assert!(dir.path().join("gcode_output").join("good.gcode").exists());
    }
}
