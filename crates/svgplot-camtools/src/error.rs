//! Error types for the CAM tools crate.

use std::io;
use svgplot_settings::SettingsError;
use thiserror::Error;

/// Errors that can occur while importing an SVG document or generating
/// G-code from it.
///
/// Problems with individual shapes are not errors at this level; they are
/// reported per element and the rest of the document still converts.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The requested file format is not supported.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The input file does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The document is not well-formed XML.
    #[error("SVG parse error: {0}")]
    SvgParseError(#[from] roxmltree::Error),

    /// The root element is not `<svg>`.
    #[error("Root element is <{0}>, expected <svg>")]
    NotSvg(String),

    /// Neither `width`/`height` nor a `viewBox` gives the document size.
    #[error("Unable to get width and height for the svg")]
    MissingDimensions,

    /// Document size is zero, negative or not a number.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The settings failed validation.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
