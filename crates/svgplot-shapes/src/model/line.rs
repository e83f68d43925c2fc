use svgplot_core::ShapeError;

use super::{Attributes, ShapeAdapter, ShapeKind};
use crate::geometry::Transform;

/// `<line>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub transform: Option<Transform>,
}

impl SvgLine {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Line;
        Ok(Self {
            x1: attrs.coordinate(kind, "x1")?,
            y1: attrs.coordinate(kind, "y1")?,
            x2: attrs.coordinate(kind, "x2")?,
            y2: attrs.coordinate(kind, "y2")?,
            transform: attrs.transform(kind)?,
        })
    }
}

impl ShapeAdapter for SvgLine {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn path_data(&self) -> Option<String> {
        Some(format!(
            "M {},{} L {},{}",
            self.x1, self.y1, self.x2, self.y2
        ))
    }

    fn transform(&self) -> Option<Transform> {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_origin() {
        let attrs = [("x2", "5"), ("y2", "-2.5")].into_iter().collect();
        let line = SvgLine::from_attributes(&attrs).unwrap();
        assert_eq!(line.path_data().unwrap(), "M 0,0 L 5,-2.5");
    }
}
