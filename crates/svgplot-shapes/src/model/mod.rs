//! Shape adapters.
//!
//! Each supported SVG element is built once from its attribute map and
//! exposes the same two things: path data describing its outline, and the
//! transform to apply to the points generated from it.

use std::collections::HashMap;
use std::fmt;

use svgplot_core::{PathError, Point, ShapeError};
use tracing::warn;

use crate::geometry::{parse_transform, Transform};
use crate::points::{collect_points, PointGenerator};

pub mod circle;
pub mod ellipse;
pub mod line;
pub mod path;
pub mod polyline;
pub mod rect;

pub use circle::SvgCircle;
pub use ellipse::SvgEllipse;
pub use line::SvgLine;
pub use path::SvgPath;
pub use polyline::SvgPolyline;
pub use rect::SvgRect;

/// Raw element attributes, keyed by local name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(HashMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A coordinate attribute; absent means 0.
    pub(crate) fn coordinate(&self, kind: ShapeKind, name: &str) -> Result<f64, ShapeError> {
        match self.get(name) {
            Some(value) => parse_number(kind, name, value),
            None => Ok(0.0),
        }
    }

    /// A length attribute that must be present and non-negative.
    pub(crate) fn required_length(&self, kind: ShapeKind, name: &str) -> Result<f64, ShapeError> {
        self.optional_length(kind, name)?
            .ok_or_else(|| ShapeError::MissingAttribute {
                shape: kind.to_string(),
                attribute: name.to_string(),
            })
    }

    /// A non-negative length attribute that may be absent.
    pub(crate) fn optional_length(
        &self,
        kind: ShapeKind,
        name: &str,
    ) -> Result<Option<f64>, ShapeError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let length = parse_number(kind, name, value)?;
        if length < 0.0 {
            return Err(invalid(kind, name, value, "must not be negative"));
        }
        Ok(Some(length))
    }

    pub(crate) fn required(&self, kind: ShapeKind, name: &str) -> Result<&str, ShapeError> {
        self.get(name).ok_or_else(|| ShapeError::MissingAttribute {
            shape: kind.to_string(),
            attribute: name.to_string(),
        })
    }

    /// The element's own `transform`, if declared.
    pub(crate) fn transform(&self, kind: ShapeKind) -> Result<Option<Transform>, ShapeError> {
        match self.get("transform") {
            Some(value) => parse_transform(value).map_err(|source| malformed(kind, "transform", source)),
            None => Ok(None),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a number with an optional `px` suffix.
fn parse_number(kind: ShapeKind, name: &str, value: &str) -> Result<f64, ShapeError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    match number.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(invalid(kind, name, value, "not a number")),
    }
}

fn invalid(kind: ShapeKind, name: &str, value: &str, reason: &str) -> ShapeError {
    ShapeError::InvalidAttribute {
        shape: kind.to_string(),
        attribute: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub(crate) fn malformed(kind: ShapeKind, name: &str, source: PathError) -> ShapeError {
    ShapeError::Malformed {
        shape: kind.to_string(),
        attribute: name.to_string(),
        source,
    }
}

/// Supported element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Path,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Rect,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Line,
        ShapeKind::Polyline,
        ShapeKind::Polygon,
        ShapeKind::Path,
    ];

    /// Map a local (un-prefixed) tag name to a kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Path => "path",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common interface of all shape adapters.
pub trait ShapeAdapter {
    fn kind(&self) -> ShapeKind;

    /// Outline as path data, or `None` when the shape is degenerate
    /// (zero size, empty point list) and draws nothing.
    fn path_data(&self) -> Option<String>;

    /// Transform to apply to every generated point.
    fn transform(&self) -> Option<Transform>;

    /// Flattened points of the outline with the transform applied.
    ///
    /// Errors are logged and yield an empty sequence so a single bad shape
    /// never aborts its caller.
    fn to_points(&self, smoothness: f64) -> Vec<Point> {
        match self.path_data() {
            Some(d) => collect_points(&d, self.transform(), smoothness),
            None => {
                warn!("Skipping degenerate <{}>", self.kind());
                Vec::new()
            }
        }
    }
}

/// Any supported shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(SvgRect),
    Circle(SvgCircle),
    Ellipse(SvgEllipse),
    Line(SvgLine),
    Polyline(SvgPolyline),
    Polygon(SvgPolyline),
    Path(SvgPath),
}

impl Shape {
    /// Build the adapter for `kind` from raw attributes.
    pub fn from_attributes(kind: ShapeKind, attrs: &Attributes) -> Result<Self, ShapeError> {
        Ok(match kind {
            ShapeKind::Rect => Shape::Rect(SvgRect::from_attributes(attrs)?),
            ShapeKind::Circle => Shape::Circle(SvgCircle::from_attributes(attrs)?),
            ShapeKind::Ellipse => Shape::Ellipse(SvgEllipse::from_attributes(attrs)?),
            ShapeKind::Line => Shape::Line(SvgLine::from_attributes(attrs)?),
            ShapeKind::Polyline => Shape::Polyline(SvgPolyline::from_attributes(attrs, false)?),
            ShapeKind::Polygon => Shape::Polygon(SvgPolyline::from_attributes(attrs, true)?),
            ShapeKind::Path => Shape::Path(SvgPath::from_attributes(attrs)?),
        })
    }

    /// Prepend an ancestor transform: the element's own transform is applied
    /// first, then `parent`.
    pub fn with_parent_transform(mut self, parent: Transform) -> Self {
        if parent.is_identity() {
            return self;
        }
        let slot = self.transform_slot();
        *slot = Some(match *slot {
            Some(own) => parent.multiply(&own),
            None => parent,
        });
        self
    }

    /// Start generating the outline's points, or `None` for a degenerate
    /// shape that draws nothing.
    pub fn points(&self, smoothness: f64) -> svgplot_core::Result<Option<PointGenerator>> {
        match self.path_data() {
            Some(d) => Ok(Some(PointGenerator::new(&d, self.transform(), smoothness)?)),
            None => Ok(None),
        }
    }

    fn transform_slot(&mut self) -> &mut Option<Transform> {
        match self {
            Shape::Rect(s) => &mut s.transform,
            Shape::Circle(s) => &mut s.transform,
            Shape::Ellipse(s) => &mut s.transform,
            Shape::Line(s) => &mut s.transform,
            Shape::Polyline(s) | Shape::Polygon(s) => &mut s.transform,
            Shape::Path(s) => &mut s.transform,
        }
    }

    fn adapter(&self) -> &dyn ShapeAdapter {
        match self {
            Shape::Rect(s) => s,
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Line(s) => s,
            Shape::Polyline(s) | Shape::Polygon(s) => s,
            Shape::Path(s) => s,
        }
    }
}

impl ShapeAdapter for Shape {
    fn kind(&self) -> ShapeKind {
        self.adapter().kind()
    }

    fn path_data(&self) -> Option<String> {
        self.adapter().path_data()
    }

    fn transform(&self) -> Option<Transform> {
        self.adapter().transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(ShapeKind::from_tag("rect"), Some(ShapeKind::Rect));
        assert_eq!(ShapeKind::from_tag("polygon"), Some(ShapeKind::Polygon));
        assert_eq!(ShapeKind::from_tag("g"), None);
        assert_eq!(ShapeKind::from_tag("Rect"), None);
    }

    #[test]
    fn test_lengths_accept_px() {
        let attrs: Attributes = [("width", "12.5px"), ("height", " 3 ")].into_iter().collect();
        assert_eq!(attrs.required_length(ShapeKind::Rect, "width").unwrap(), 12.5);
        assert_eq!(attrs.required_length(ShapeKind::Rect, "height").unwrap(), 3.0);
    }

    #[test]
    fn test_length_errors() {
        let attrs: Attributes = [("width", "-1"), ("height", "abc")].into_iter().collect();
        assert!(matches!(
            attrs.required_length(ShapeKind::Rect, "width"),
            Err(ShapeError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            attrs.required_length(ShapeKind::Rect, "height"),
            Err(ShapeError::InvalidAttribute { .. })
        ));
        assert_eq!(
            attrs.required_length(ShapeKind::Rect, "r"),
            Err(ShapeError::MissingAttribute {
                shape: "rect".into(),
                attribute: "r".into()
            })
        );
    }

    #[test]
    fn test_coordinates_default_to_zero() {
        let attrs: Attributes = [("x", "-4")].into_iter().collect();
        assert_eq!(attrs.coordinate(ShapeKind::Rect, "x").unwrap(), -4.0);
        assert_eq!(attrs.coordinate(ShapeKind::Rect, "y").unwrap(), 0.0);
    }

    #[test]
    fn test_malformed_transform() {
        let attrs: Attributes = [("d", "M0,0 L1,1"), ("transform", "wobble(3)")]
            .into_iter()
            .collect();
        let err = Shape::from_attributes(ShapeKind::Path, &attrs).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::Malformed { ref attribute, .. } if attribute == "transform"
        ));
    }

    #[test]
    fn test_points_reports_path_errors() {
        let attrs: Attributes = [("d", "M0,0 L10")].into_iter().collect();
        let shape = Shape::from_attributes(ShapeKind::Path, &attrs).unwrap();
        let err = shape.points(0.2).unwrap_err();
        assert!(err.is_path_error());

        let attrs: Attributes = [("width", "0"), ("height", "5")].into_iter().collect();
        let shape = Shape::from_attributes(ShapeKind::Rect, &attrs).unwrap();
        assert!(shape.points(0.2).unwrap().is_none());

        let attrs: Attributes = [("x2", "4")].into_iter().collect();
        let shape = Shape::from_attributes(ShapeKind::Line, &attrs).unwrap();
        let points: Vec<Point> = shape.points(0.2).unwrap().unwrap().collect();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
    }

    #[test]
    fn test_parent_transform_composes() {
        let attrs: Attributes = [("d", "M1,1"), ("transform", "scale(2)")].into_iter().collect();
        let shape = Shape::from_attributes(ShapeKind::Path, &attrs)
            .unwrap()
            .with_parent_transform(Transform::translate(10.0, 0.0));
        let t = shape.transform().unwrap();
        assert_eq!(t.apply(&Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
    }
}
