use svgplot_core::ShapeError;

use super::circle::ellipse_path;
use super::{Attributes, ShapeAdapter, ShapeKind};
use crate::geometry::Transform;

/// `<ellipse>`.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgEllipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub transform: Option<Transform>,
}

impl SvgEllipse {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Ellipse;
        Ok(Self {
            rx: attrs.required_length(kind, "rx")?,
            ry: attrs.required_length(kind, "ry")?,
            cx: attrs.coordinate(kind, "cx")?,
            cy: attrs.coordinate(kind, "cy")?,
            transform: attrs.transform(kind)?,
        })
    }
}

impl ShapeAdapter for SvgEllipse {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn path_data(&self) -> Option<String> {
        ellipse_path(self.cx, self.cy, self.rx, self.ry)
    }

    fn transform(&self) -> Option<Transform> {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path() {
        let attrs = [("cx", "0"), ("cy", "0"), ("rx", "20"), ("ry", "10")]
            .into_iter()
            .collect();
        let e = SvgEllipse::from_attributes(&attrs).unwrap();
        assert_eq!(
            e.path_data().unwrap(),
            "M -20,0 A 20,10 0 1,0 20,0 A 20,10 0 1,0 -20,0 Z"
        );
    }

    #[test]
    fn test_both_radii_required() {
        let attrs = [("rx", "20")].into_iter().collect();
        assert_eq!(
            SvgEllipse::from_attributes(&attrs),
            Err(ShapeError::MissingAttribute {
                shape: "ellipse".into(),
                attribute: "ry".into()
            })
        );
    }
}
