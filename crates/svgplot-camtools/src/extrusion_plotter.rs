//! Single-layer extrusion G-code generation.
//!
//! Every shape is flattened to points, scaled onto the bed and written as a
//! `G0` to its first point followed by `G1` moves carrying a cumulative `E`
//! value proportional to the distance travelled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use svgplot_core::Point;
use svgplot_settings::{Config, OutputCoordinates};
use svgplot_shapes::{ShapeAdapter, MIN_SMOOTHNESS};
use tracing::{debug, info, warn};

use crate::error::CamToolResult;
use crate::svg_import::SvgDocument;

/// Counters and debug log of one conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Uniform scale from document units to bed millimetres.
    pub scale: f64,
    pub shapes_converted: usize,
    /// Degenerate shapes that produce no path.
    pub shapes_skipped: usize,
    /// Shapes rejected for bad attributes or path data.
    pub shapes_failed: usize,
    pub points_written: usize,
    /// Points dropped for falling outside the bed.
    pub points_out_of_bounds: usize,
    /// Final cumulative extrusion value.
    pub extrusion: f64,
    /// Human-readable trace written to the debug log file.
    pub log: Vec<String>,
}

impl ConversionReport {
    fn note(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!("{}", line);
        self.log.push(line);
    }
}

/// Generated G-code and its report.
#[derive(Debug, Clone)]
pub struct GcodeProgram {
    pub gcode: String,
    pub report: ConversionReport,
}

/// Converts SVG documents to extrusion G-code.
#[derive(Debug, Clone)]
pub struct ExtrusionPlotter {
    config: Config,
    smoothness: f64,
}

impl ExtrusionPlotter {
    /// Validate `config` and build a plotter.
    ///
    /// Smoothness below [`MIN_SMOOTHNESS`] is raised to it.
    pub fn new(config: Config) -> CamToolResult<Self> {
        config.validate()?;
        let requested = config.conversion.smoothness;
        let smoothness = if requested < MIN_SMOOTHNESS {
            warn!(
                "Smoothness {} is below {}, using {}",
                requested, MIN_SMOOTHNESS, MIN_SMOOTHNESS
            );
            MIN_SMOOTHNESS
        } else {
            requested
        };
        Ok(Self { config, smoothness })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Smoothness actually used for flattening.
    pub fn smoothness(&self) -> f64 {
        self.smoothness
    }

    /// Scale factor that fits the document on the bed without distortion.
    /// Documents smaller than the bed are never enlarged.
    pub fn scale_for(&self, document: &SvgDocument) -> f64 {
        let machine = &self.config.machine;
        let scale_x = machine.bed_max_x / document.width;
        let scale_y = machine.bed_max_y / document.height;
        scale_x.min(scale_y).min(1.0)
    }

    /// Map a document point onto the bed (scaled, y axis flipped).
    pub fn to_device(&self, p: &Point, scale: f64) -> Point {
        Point::new(scale * p.x, self.config.machine.bed_max_y - scale * p.y)
    }

    fn in_bounds(&self, p: &Point) -> bool {
        let machine = &self.config.machine;
        (0.0..=machine.bed_max_x).contains(&p.x) && (0.0..=machine.bed_max_y).contains(&p.y)
    }

    /// Generate the full program for `document`.
    pub fn generate(&self, document: &SvgDocument) -> GcodeProgram {
        let machine = &self.config.machine;
        let templates = &self.config.templates;
        let mode = self.config.conversion.output_coordinates;
        let scale = self.scale_for(document);

        let mut report = ConversionReport {
            scale,
            ..ConversionReport::default()
        };
        report.note(format!("width: {}", document.width));
        report.note(format!("height: {}", document.height));
        report.note(format!("scale: {}", scale));
        report.note(format!("coordinates: {}", mode));

        let mut gcode = String::new();
        push_block(&mut gcode, &templates.preamble);
        // Written in full, as `7200.0` or `7200.25`.
        gcode.push_str(&format!("G1 F{:?}\n", machine.feed_rate));

        // Cumulative across the whole program; never reset between shapes.
        let mut extrusion = 0.0;

        for element in document.shapes() {
            report.note(format!("<{}> at line {}", element.kind, element.line));

            let points = match element.points(self.smoothness) {
                Ok(Some(points)) => points,
                Ok(None) => {
                    report.note("  no path instructions");
                    report.shapes_skipped += 1;
                    continue;
                }
                Err(e) => {
                    // Build errors were already logged on import.
                    if e.is_path_error() {
                        warn!("Skipping <{}> at line {}: {}", element.kind, element.line, e);
                    }
                    report.note(format!("  rejected: {}", e));
                    report.shapes_failed += 1;
                    continue;
                }
            };
            if let Some(d) = element.shape.as_ref().ok().and_then(|s| s.path_data()) {
                report.note(format!("  d: {}", d));
            }

            push_block(&mut gcode, &templates.shape_preamble);

            let mut previous: Option<Point> = None;
            let mut first_move = true;
            for p in points {
                let device = self.to_device(&p, scale);
                let length = previous.map_or(0.0, |prev| prev.distance_to(&device));
                previous = Some(device);
                extrusion += length * machine.extrusion_multiplier;

                let out = match mode {
                    OutputCoordinates::Source => p,
                    OutputCoordinates::Device => device,
                };

                if !self.in_bounds(&out) {
                    report.note(format!(
                        "  pt {} not printed (bed {} x {})",
                        out, machine.bed_max_x, machine.bed_max_y
                    ));
                    report.points_out_of_bounds += 1;
                    continue;
                }

                if first_move {
                    gcode.push_str(&format!("G0 X{:.3} Y{:.3}\n", out.x, out.y));
                    first_move = false;
                } else {
                    gcode.push_str(&format!(
                        "G1 X{:.3} Y{:.3} E{:.3}\n",
                        out.x, out.y, extrusion
                    ));
                }
                report.points_written += 1;
            }

            push_block(&mut gcode, &templates.shape_postamble);
            report.shapes_converted += 1;
        }

        push_block(&mut gcode, &templates.postamble);
        report.extrusion = extrusion;
        report.note(format!(
            "{} shape(s) converted, {} skipped, {} failed",
            report.shapes_converted, report.shapes_skipped, report.shapes_failed
        ));

        GcodeProgram { gcode, report }
    }

    /// Parse and convert an `.svg` file without writing anything.
    pub fn generate_from_file(&self, path: impl AsRef<Path>) -> CamToolResult<GcodeProgram> {
        let document = SvgDocument::from_file(path)?;
        Ok(self.generate(&document))
    }
}

/// Append a template block followed by a newline; empty blocks are omitted.
fn push_block(gcode: &mut String, block: &str) {
    if block.is_empty() {
        return;
    }
    gcode.push_str(block);
    if !block.ends_with('\n') {
        gcode.push('\n');
    }
}

/// Files written by [`convert_file`].
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub gcode_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub report: ConversionReport,
}

/// Convert `path` and write `<dir>/<output_dir>/<stem>.gcode`, plus
/// `<dir>/<log_dir>/<stem>.log` when debug logging is enabled.
pub fn convert_file(path: impl AsRef<Path>, config: &Config) -> Result<ConversionOutput> {
    let path = path.as_ref();
    let plotter = ExtrusionPlotter::new(config.clone()).context("Invalid configuration")?;
    let program = plotter
        .generate_from_file(path)
        .with_context(|| format!("Failed to convert {}", path.display()))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Input file name is not valid UTF-8")?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let output_dir = dir.join(&config.conversion.output_dir);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let gcode_path = output_dir.join(format!("{}.gcode", stem));
    std::fs::write(&gcode_path, &program.gcode)
        .with_context(|| format!("Failed to write {}", gcode_path.display()))?;

    let log_path = if config.conversion.write_debug_log {
        let log_dir = dir.join(&config.conversion.log_dir);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create {}", log_dir.display()))?;
        let log_path = log_dir.join(format!("{}.log", stem));

        let mut log = String::new();
        log.push_str(&format!(
            "Generated: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        log.push_str(&format!("Input File: {}\n", path.display()));
        log.push_str(&format!("Output File: {}\n", gcode_path.display()));
        log.push_str(&format!("Log File: {}\n\n", log_path.display()));
        for line in &program.report.log {
            log.push_str(line);
            log.push('\n');
        }
        std::fs::write(&log_path, log)
            .with_context(|| format!("Failed to write {}", log_path.display()))?;
        Some(log_path)
    } else {
        None
    };

    info!(
        "Converted {} -> {} ({} shapes, {} points)",
        path.display(),
        gcode_path.display(),
        program.report.shapes_converted,
        program.report.points_written
    );

    Ok(ConversionOutput {
        gcode_path,
        log_path,
        report: program.report,
    })
}
