//! Geometry primitives: cubic Bezier flattening, elliptical arc conversion
//! and 2D affine transforms.

pub mod arc;
pub mod bezier;
pub mod transform;

pub use arc::{ArcConversion, SvgArc};
pub use bezier::{CubicBezier, Flattened, MAX_SUBDIVISION_DEPTH};
pub use transform::{parse_transform, Transform};
