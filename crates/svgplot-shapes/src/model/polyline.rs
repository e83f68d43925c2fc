use svgplot_core::{PathError, Point, ShapeError};

use super::{malformed, Attributes, ShapeAdapter, ShapeKind};
use crate::geometry::Transform;
use crate::path::parse_numbers;

/// `<polyline>`, or `<polygon>` when `closed`.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPolyline {
    pub points: Vec<Point>,
    pub closed: bool,
    pub transform: Option<Transform>,
}

impl SvgPolyline {
    pub fn from_attributes(attrs: &Attributes, closed: bool) -> Result<Self, ShapeError> {
        let kind = if closed {
            ShapeKind::Polygon
        } else {
            ShapeKind::Polyline
        };

        let raw = attrs.required(kind, "points")?;
        let numbers = parse_numbers(raw).map_err(|e| malformed(kind, "points", e))?;
        if numbers.len() % 2 != 0 {
            return Err(malformed(
                kind,
                "points",
                PathError::ArgumentCount {
                    command: "points".to_string(),
                    group_size: 2,
                    found: numbers.len(),
                },
            ));
        }

        Ok(Self {
            points: numbers
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect(),
            closed,
            transform: attrs.transform(kind)?,
        })
    }
}

impl ShapeAdapter for SvgPolyline {
    fn kind(&self) -> ShapeKind {
        if self.closed {
            ShapeKind::Polygon
        } else {
            ShapeKind::Polyline
        }
    }

    fn path_data(&self) -> Option<String> {
        let (first, rest) = self.points.split_first()?;
        let mut d = format!("M {},{}", first.x, first.y);
        for p in rest {
            d.push_str(&format!(" L {},{}", p.x, p.y));
        }
        if self.closed {
            d.push_str(" Z");
        }
        Some(d)
    }

    fn transform(&self) -> Option<Transform> {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_path() {
        let attrs = [("points", "0,0 10,0 10,10")].into_iter().collect();
        let shape = SvgPolyline::from_attributes(&attrs, false).unwrap();
        assert_eq!(shape.path_data().unwrap(), "M 0,0 L 10,0 L 10,10");
    }

    #[test]
    fn test_polygon_closes() {
        let attrs = [("points", "0 0 10 0 10 10")].into_iter().collect();
        let shape = SvgPolyline::from_attributes(&attrs, true).unwrap();
        assert_eq!(shape.path_data().unwrap(), "M 0,0 L 10,0 L 10,10 Z");
        assert_eq!(shape.kind(), ShapeKind::Polygon);
    }

    #[test]
    fn test_odd_coordinate_count() {
        let attrs = [("points", "0,0 10")].into_iter().collect();
        let err = SvgPolyline::from_attributes(&attrs, false).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::Malformed {
                source: PathError::ArgumentCount { found: 3, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_empty_points_is_degenerate() {
        let attrs = [("points", "  ")].into_iter().collect();
        let shape = SvgPolyline::from_attributes(&attrs, false).unwrap();
        assert_eq!(shape.path_data(), None);
    }
}
