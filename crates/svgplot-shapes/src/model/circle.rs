use svgplot_core::ShapeError;

use super::{Attributes, ShapeAdapter, ShapeKind};
use crate::geometry::Transform;

/// `<circle>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgCircle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub transform: Option<Transform>,
}

impl SvgCircle {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Circle;
        Ok(Self {
            r: attrs.required_length(kind, "r")?,
            cx: attrs.coordinate(kind, "cx")?,
            cy: attrs.coordinate(kind, "cy")?,
            transform: attrs.transform(kind)?,
        })
    }
}

impl ShapeAdapter for SvgCircle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn path_data(&self) -> Option<String> {
        ellipse_path(self.cx, self.cy, self.r, self.r)
    }

    fn transform(&self) -> Option<Transform> {
        self.transform
    }
}

/// Two half arcs starting and ending at the leftmost point.
pub(crate) fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<String> {
    if rx == 0.0 || ry == 0.0 {
        return None;
    }
    Some(format!(
        "M {},{} A {},{} 0 1,0 {},{} A {},{} 0 1,0 {},{} Z",
        cx - rx,
        cy,
        rx,
        ry,
        cx + rx,
        cy,
        rx,
        ry,
        cx - rx,
        cy
    ))
}
