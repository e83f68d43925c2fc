//! SVG document import.
//!
//! Reads the document size from the root element and collects every
//! supported shape element in document order, with all ancestor group
//! transforms folded into the shape's own transform.

use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use svgplot_core::ShapeError;
use svgplot_shapes::path::parse_numbers;
use svgplot_shapes::{
    parse_transform, Attributes, PointGenerator, Shape, ShapeKind, Token, Tokenizer, Transform,
};
use tracing::{debug, warn};

use crate::error::{CamToolError, CamToolResult};

/// Containers whose content is never drawn directly.
const NON_RENDERED: &[&str] = &["defs", "clipPath", "mask", "pattern", "marker", "symbol"];

/// One supported shape element found in the document.
#[derive(Debug, Clone)]
pub struct ImportedElement {
    pub kind: ShapeKind,
    /// 1-based source line of the element's start tag.
    pub line: u32,
    /// The element's own (un-namespaced) attributes.
    pub attributes: Attributes,
    /// The built shape, or why it could not be built.
    pub shape: Result<Shape, ShapeError>,
}

impl ImportedElement {
    /// Points of the element's outline, or `None` when it is degenerate.
    /// A shape that could not be built is reported as [`svgplot_core::Error::Shape`].
    pub fn points(&self, smoothness: f64) -> svgplot_core::Result<Option<PointGenerator>> {
        let shape = self.shape.as_ref().map_err(|e| e.clone())?;
        shape.points(smoothness)
    }
}

/// A parsed SVG document reduced to what the plotter needs.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    /// Document width in user units.
    pub width: f64,
    /// Document height in user units.
    pub height: f64,
    elements: Vec<ImportedElement>,
    ignored: usize,
}

impl SvgDocument {
    /// Parse SVG text.
    pub fn parse(text: &str) -> CamToolResult<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(CamToolError::NotSvg(root.tag_name().name().to_string()));
        }

        let (width, height) = document_size(root)?;
        debug!("Document size {} x {}", width, height);

        let mut document = Self {
            width,
            height,
            elements: Vec::new(),
            ignored: 0,
        };
        document.collect(&doc, root, Transform::IDENTITY);
        Ok(document)
    }

    /// Read and parse an `.svg` file.
    pub fn from_file(path: impl AsRef<Path>) -> CamToolResult<Self> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if !is_svg {
            return Err(CamToolError::UnsupportedFormat(path.display().to_string()));
        }
        if !path.is_file() {
            return Err(CamToolError::NotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Supported shape elements in document order.
    pub fn shapes(&self) -> &[ImportedElement] {
        &self.elements
    }

    /// Number of elements that were not shapes (groups, metadata, ...).
    pub fn ignored_elements(&self) -> usize {
        self.ignored
    }

    fn collect(&mut self, doc: &Document, node: Node, parent: Transform) {
        for child in node.children().filter(Node::is_element) {
            let tag = child.tag_name().name();
            let line = doc.text_pos_at(child.range().start).row;

            if NON_RENDERED.contains(&tag) {
                debug!("Skipping <{}> subtree at line {}", tag, line);
                self.ignored += 1;
                continue;
            }

            let Some(kind) = ShapeKind::from_tag(tag) else {
                self.ignored += 1;
                let transform = match child.attribute("transform").map(parse_transform) {
                    Some(Ok(Some(own))) => parent.multiply(&own),
                    Some(Err(e)) => {
                        warn!("Ignoring transform of <{}> at line {}: {}", tag, line, e);
                        parent
                    }
                    _ => parent,
                };
                self.collect(doc, child, transform);
                continue;
            };

            let attributes: Attributes = child
                .attributes()
                .filter(|attr| attr.namespace().is_none())
                .map(|attr| (attr.name(), attr.value()))
                .collect();
            let shape = Shape::from_attributes(kind, &attributes)
                .map(|shape| shape.with_parent_transform(parent));
            if let Err(e) = &shape {
                warn!("Skipping <{}> at line {}: {}", kind, line, e);
            }

            self.elements.push(ImportedElement {
                kind,
                line,
                attributes,
                shape,
            });
        }
    }
}

fn document_size(root: Node) -> CamToolResult<(f64, f64)> {
    let width = root.attribute("width").and_then(length_prefix);
    let height = root.attribute("height").and_then(length_prefix);

    let (width, height) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        _ => root
            .attribute("viewBox")
            .and_then(view_box_size)
            .ok_or(CamToolError::MissingDimensions)?,
    };

    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Ok((width, height))
    } else {
        Err(CamToolError::InvalidDimensions(format!(
            "{} x {}",
            width, height
        )))
    }
}

/// Leading number of a length such as `"210mm"`; the unit is ignored.
/// Percentages are relative to a viewport we do not have, so they count
/// as absent.
fn length_prefix(value: &str) -> Option<f64> {
    if value.trim_end().ends_with('%') {
        return None;
    }
    match Tokenizer::new(value).next() {
        Some((_, Ok(Token::Number(n)))) => Some(n),
        _ => None,
    }
}

fn view_box_size(value: &str) -> Option<(f64, f64)> {
    let numbers = parse_numbers(value).ok()?;
    match numbers[..] {
        [_, _, width, height] => Some((width, height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgplot_shapes::ShapeAdapter;

    #[test]
    fn test_length_prefix() {
        assert_eq!(length_prefix("210mm"), Some(210.0));
        assert_eq!(length_prefix(" 12.5 "), Some(12.5));
        assert_eq!(length_prefix("10em"), Some(10.0));
        assert_eq!(length_prefix("100%"), None);
        assert_eq!(length_prefix("auto"), None);
    }

    #[test]
    fn test_size_from_attributes() {
        let doc = SvgDocument::parse(r#"<svg width="100mm" height="50mm"></svg>"#).unwrap();
        assert_eq!((doc.width, doc.height), (100.0, 50.0));
    }

    #[test]
    fn test_size_from_view_box() {
        let doc = SvgDocument::parse(r#"<svg width="100" viewBox="0 0 300,400"/>"#).unwrap();
        assert_eq!((doc.width, doc.height), (300.0, 400.0));
    }

    #[test]
    fn test_missing_size() {
        assert!(matches!(
            SvgDocument::parse("<svg/>"),
            Err(CamToolError::MissingDimensions)
        ));
        assert!(matches!(
            SvgDocument::parse(r#"<svg width="0" height="10"/>"#),
            Err(CamToolError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_not_svg() {
        assert!(matches!(
            SvgDocument::parse("<html/>"),
            Err(CamToolError::NotSvg(_))
        ));
    }

    #[test]
    fn test_collects_shapes_in_order() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <title>t</title>
                <rect width="10" height="10"/>
                <g><circle r="5"/><path d="M0,0 L1,1"/></g>
                <defs><rect width="1" height="1"/></defs>
            </svg>"#,
        )
        .unwrap();
        let kinds: Vec<_> = doc.shapes().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Rect, ShapeKind::Circle, ShapeKind::Path]);
        assert_eq!(doc.shapes()[0].line, 3);
        assert_eq!(doc.ignored_elements(), 3);
    }

    #[test]
    fn test_group_transforms_compose() {
        let doc = SvgDocument::parse(
            r#"<svg width="100" height="100">
                <g transform="translate(10,0)">
                    <g transform="scale(2)">
                        <line x2="1" transform="translate(0,1)"/>
                    </g>
                </g>
            </svg>"#,
        )
        .unwrap();
        let line = doc.shapes()[0].shape.as_ref().unwrap();
        let t = line.transform().unwrap();
        let p = t.apply(&svgplot_core::Point::new(1.0, 0.0));
        // own translate, then scale, then outer translate
        assert_eq!(p, svgplot_core::Point::new(12.0, 2.0));
    }

    #[test]
    fn test_bad_element_does_not_abort() {
        let doc = SvgDocument::parse(
            r#"<svg width="100" height="100"><circle cx="1"/><rect width="2" height="2"/></svg>"#,
        )
        .unwrap();
        assert_eq!(doc.shapes().len(), 2);
        assert!(matches!(
            doc.shapes()[0].shape,
            Err(ShapeError::MissingAttribute { .. })
        ));
        assert!(doc.shapes()[1].shape.is_ok());
    }

    #[test]
    fn test_element_points_carry_build_errors() {
        let doc = SvgDocument::parse(
            r#"<svg width="100" height="100"><ellipse rx="3"/><line x2="2"/></svg>"#,
        )
        .unwrap();
        let err = doc.shapes()[0].points(0.2).unwrap_err();
        assert!(err.is_shape_error());
        let points: Vec<_> = doc.shapes()[1].points(0.2).unwrap().unwrap().collect();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_namespaced_attributes_ignored() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" width="10" height="10">
                <path inkscape:label="outline" d="M0,0 L5,5"/>
            </svg>"#,
        )
        .unwrap();
        let attrs = &doc.shapes()[0].attributes;
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("d"), Some("M0,0 L5,5"));
    }
}
