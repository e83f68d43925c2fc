use svgplot_core::ShapeError;

use super::{Attributes, ShapeAdapter, ShapeKind};
use crate::geometry::Transform;

/// `<path>`; the path data is passed through as written.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    pub d: String,
    pub transform: Option<Transform>,
}

impl SvgPath {
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Path;
        Ok(Self {
            d: attrs.required(kind, "d")?.to_string(),
            transform: attrs.transform(kind)?,
        })
    }
}

impl ShapeAdapter for SvgPath {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Path
    }

    fn path_data(&self) -> Option<String> {
        if self.d.trim().is_empty() {
            None
        } else {
            Some(self.d.clone())
        }
    }

    fn transform(&self) -> Option<Transform> {
        self.transform
    }
}
