//! # svgplot CAM Tools
//!
//! Turns SVG documents into single-layer extrusion G-code.
//!
//! - **SVG import** ([`svg_import`]): document size, shape collection and
//!   group transform composition
//! - **Extrusion plotter** ([`extrusion_plotter`]): bed scaling, cumulative
//!   extrusion and G-code emission, plus [`convert_file`] which writes the
//!   program and its debug log next to the input

pub mod error;
pub mod extrusion_plotter;
pub mod svg_import;

pub use error::{CamToolError, CamToolResult};
pub use extrusion_plotter::{
    convert_file, ConversionOutput, ConversionReport, ExtrusionPlotter, GcodeProgram,
};
pub use svg_import::{ImportedElement, SvgDocument};
