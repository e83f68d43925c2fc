//! svgplot Settings Crate
//!
//! Holds the machine profile, G-code templates and conversion options, and
//! reads/writes them as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, ConversionSettings, GcodeTemplates, MachineSettings, OutputCoordinates};
pub use error::{SettingsError, SettingsResult};
