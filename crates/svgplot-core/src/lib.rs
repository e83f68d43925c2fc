//! # svgplot Core
//!
//! Core types shared by every svgplot crate: the 2D [`Point`] that flows
//! through the shape pipeline and the error taxonomy used to isolate
//! failures at shape granularity.

pub mod data;
pub mod error;

pub use data::Point;
pub use error::{Error, PathError, Result, ShapeError};
