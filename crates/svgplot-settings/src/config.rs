//! Configuration for svgplot
//!
//! Configuration is organized into three sections:
//! - Machine profile (bed size, feed rate, extrusion multiplier)
//! - G-code templates wrapped around the whole program and each shape
//! - Conversion options (curve smoothness, coordinate mode, output layout)
//!
//! Every field has a default, so a file only needs the values it changes.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_PREAMBLE: &str = ";FLAVOR:RepRap
;TIME:37
G21 ;metric values
G90 ;absolute positioning
M302 ;run nozzle cold
M82 ;set extruder to absolute mode
M107 ;start with the fan off
G28 X0 Y0 ;move X/Y to min endstops
G28 Z0 ;move Z to min endstops
G1 Z15.0 F9000 ;move the platform down 15mm
G92 E0 ;zero the extruded length
G1 F200 E6 ;extrude 6 mm of feed stock
G92 E0 ;zero the extruded length again
G1 F9000
;Put printing message on LCD screen
M117 Printing...
;Generated with Cura_SteamEngine 2.1.2
;LAYER_COUNT:1
;LAYER:0
M107
G1 F1500.00 E-6.50000";

const DEFAULT_POSTAMBLE: &str = "M104 S0 ;extruder heater off
M140 S0 ;heated bed heater off (if you have it)
G91 ;relative positioning
G1 E-1 F300  ;retract the filament a bit before lifting the nozzle, to release some of the pressure
G1 Z+0.5 E-5 X-20 Y-20 F9000 ;move Z up a bit and retract filament even more
G28 X0 Y0 ;move X/Y to min endstops, so the head is out of the way
M84 ;steppers off
G90 ;absolute positioning
;End of Gcode";

/// Machine profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Print bed width in mm
    pub bed_max_x: f64,
    /// Print bed height in mm
    pub bed_max_y: f64,
    /// Feed rate written once after the preamble (mm/min)
    pub feed_rate: f64,
    /// E units per mm of travel
    pub extrusion_multiplier: f64,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            bed_max_x: 200.0,
            bed_max_y: 200.0,
            feed_rate: 7200.0,
            extrusion_multiplier: 1.2,
        }
    }
}

/// Literal G-code blocks inserted around the generated moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeTemplates {
    /// Emitted once at the start of the program
    pub preamble: String,
    /// Emitted once at the end of the program
    pub postamble: String,
    /// Emitted before each shape
    pub shape_preamble: String,
    /// Emitted after each shape
    pub shape_postamble: String,
}

impl Default for GcodeTemplates {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_string(),
            postamble: DEFAULT_POSTAMBLE.to_string(),
            shape_preamble: String::new(),
            shape_postamble: String::new(),
        }
    }
}

/// Which coordinates are written to `G0`/`G1` moves and bounds-checked.
///
/// Extrusion is always computed from scaled, flipped device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputCoordinates {
    /// Raw source coordinates after the shape transform
    #[default]
    Source,
    /// Scaled and vertically flipped bed coordinates
    Device,
}

impl fmt::Display for OutputCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Device => write!(f, "device"),
        }
    }
}

/// Conversion options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    /// Curve flatness tolerance; smaller is smoother
    pub smoothness: f64,
    /// Coordinate mode for emitted moves
    pub output_coordinates: OutputCoordinates,
    /// Output directory name, created next to each input file
    pub output_dir: String,
    /// Debug-log directory name, created next to each input file
    pub log_dir: String,
    /// Write a per-file debug log
    pub write_debug_log: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            smoothness: 0.2,
            output_coordinates: OutputCoordinates::Source,
            output_dir: "gcode_output".to_string(),
            log_dir: "log".to_string(),
            write_debug_log: true,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Machine profile
    pub machine: MachineSettings,
    /// G-code templates
    pub templates: GcodeTemplates,
    /// Conversion options
    pub conversion: ConversionSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location (`<config dir>/svgplot/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("svgplot").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load the config at the platform location, or defaults if there is none
    pub fn load_or_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Ok(path) if path.is_file() => Self::load_from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |key: &str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
            }
        };

        positive("machine.bed_max_x", self.machine.bed_max_x)?;
        positive("machine.bed_max_y", self.machine.bed_max_y)?;
        positive("machine.feed_rate", self.machine.feed_rate)?;
        positive("conversion.smoothness", self.conversion.smoothness)?;

        let multiplier = self.machine.extrusion_multiplier;
        if !(multiplier >= 0.0 && multiplier.is_finite()) {
            return Err(SettingsError::invalid(
                "machine.extrusion_multiplier",
                format!("must be >= 0, got {}", multiplier),
            ));
        }

        if self.conversion.output_dir.trim().is_empty() {
            return Err(SettingsError::invalid(
                "conversion.output_dir",
                "must not be empty",
            ));
        }
        if self.conversion.log_dir.trim().is_empty() {
            return Err(SettingsError::invalid(
                "conversion.log_dir",
                "must not be empty",
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
