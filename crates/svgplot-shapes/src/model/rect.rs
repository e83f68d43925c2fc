use svgplot_core::ShapeError;

use super::{Attributes, ShapeAdapter, ShapeKind};
use crate::geometry::Transform;

/// `<rect>`, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Corner radii after defaulting and clamping.
    pub rx: f64,
    pub ry: f64,
    pub transform: Option<Transform>,
}

impl SvgRect {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Rect;
        let width = attrs.required_length(kind, "width")?;
        let height = attrs.required_length(kind, "height")?;

        // One radius implies the other.
        let (rx, ry) = match (
            attrs.optional_length(kind, "rx")?,
            attrs.optional_length(kind, "ry")?,
        ) {
            (Some(rx), Some(ry)) => (rx, ry),
            (Some(r), None) | (None, Some(r)) => (r, r),
            (None, None) => (0.0, 0.0),
        };

        Ok(Self {
            x: attrs.coordinate(kind, "x")?,
            y: attrs.coordinate(kind, "y")?,
            width,
            height,
            rx: rx.min(width / 2.0),
            ry: ry.min(height / 2.0),
            transform: attrs.transform(kind)?,
        })
    }

    fn is_rounded(&self) -> bool {
        self.rx > 0.0 && self.ry > 0.0
    }
}

impl ShapeAdapter for SvgRect {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn path_data(&self) -> Option<String> {
        if self.width == 0.0 || self.height == 0.0 {
            return None;
        }
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        if !self.is_rounded() {
            return Some(format!("M {},{} H {} V {} H {} Z", x, y, x + w, y + h, x));
        }

        let (rx, ry) = (self.rx, self.ry);
        let corner = |ex: f64, ey: f64| format!("A {},{} 0 0,1 {},{}", rx, ry, ex, ey);
        Some(format!(
            "M {},{} H {} {} V {} {} H {} {} V {} {} Z",
            x + rx,
            y,
            x + w - rx,
            corner(x + w, y + ry),
            y + h - ry,
            corner(x + w - rx, y + h),
            x + rx,
            corner(x, y + h - ry),
            y + ry,
            corner(x + rx, y),
        ))
    }

    fn transform(&self) -> Option<Transform> {
        self.transform
    }
}
