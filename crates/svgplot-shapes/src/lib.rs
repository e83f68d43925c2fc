//! # svgplot Shapes
//!
//! Turns SVG shape elements into flattened, ordered point sequences.
//!
//! ## Pipeline
//!
//! ```text
//! attributes ──► Shape adapter ──► (path data, transform)
//!                                        │
//!                                        ▼
//!                 PathParser ──► DrawingInstruction stream
//!                                        │
//!                                        ▼
//!                 PointGenerator ──► flattened + transformed Points
//! ```
//!
//! - [`geometry`]: arc-to-cubic conversion, cubic flattening, affine matrices
//! - [`path`]: tokenizer and parser for the SVG path mini-language
//! - [`model`]: one adapter per supported SVG shape element
//! - [`points`]: the lazy point generator tying it all together
//!
//! ## Usage
//!
//! ```rust,ignore
//! use svgplot_shapes::{Attributes, Shape, ShapeAdapter, ShapeKind, generate_points};
//!
//! let attrs: Attributes = [("cx", "50"), ("cy", "50"), ("r", "40")].into_iter().collect();
//! let shape = Shape::from_attributes(ShapeKind::Circle, &attrs)?;
//! if let Some(d) = shape.path_data() {
//!     for p in generate_points(&d, shape.transform(), 0.2)? {
//!         println!("{} {}", p.x, p.y);
//!     }
//! }
//! ```

pub mod geometry;
pub mod model;
pub mod path;
pub mod points;

pub use geometry::{parse_transform, ArcConversion, CubicBezier, SvgArc, Transform};
pub use model::{Attributes, Shape, ShapeAdapter, ShapeKind};
pub use path::{parse_path, DrawingInstruction, PathParser, Token, Tokenizer};
pub use points::{collect_points, generate_points, PointGenerator, MIN_SMOOTHNESS};
pub use svgplot_core::Point;
