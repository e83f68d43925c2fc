//! Lazy point generation from path data.

use std::collections::VecDeque;

use svgplot_core::{PathError, Point};
use tracing::{debug, warn};

use crate::geometry::{CubicBezier, Flattened, Transform};
use crate::path::{DrawingInstruction, PathParser};

/// Lowest smoothness the driver will pass down; smaller configured values
/// are raised to this.
pub const MIN_SMOOTHNESS: f64 = 0.1;

/// Iterator over the flattened, transformed points of one path.
///
/// Path data is parsed up front, so a malformed path fails in
/// [`PointGenerator::new`] before any point is produced. Curves are
/// flattened on demand.
#[derive(Debug, Clone)]
pub struct PointGenerator {
    instructions: std::vec::IntoIter<DrawingInstruction>,
    transform: Transform,
    smoothness: f64,
    current: Point,
    subpath_start: Point,
    start_pending: bool,
    queue: VecDeque<Point>,
    curve: Option<Flattened>,
}

impl PointGenerator {
    pub fn new(d: &str, transform: Option<Transform>, smoothness: f64) -> Result<Self, PathError> {
        if !(smoothness > 0.0 && smoothness.is_finite()) {
            return Err(PathError::InvalidSmoothness { value: smoothness });
        }

        let mut parser = PathParser::new(d);
        let instructions = parser.by_ref().collect::<Result<Vec<_>, _>>()?;
        if !parser.diagnostics().is_empty() {
            debug!(
                "Path parsed with {} diagnostic(s)",
                parser.diagnostics().len()
            );
        }

        Ok(Self {
            instructions: instructions.into_iter(),
            transform: transform.unwrap_or_default(),
            smoothness,
            current: Point::ORIGIN,
            subpath_start: Point::ORIGIN,
            // Drawing before any MoveTo starts from the origin.
            start_pending: true,
            queue: VecDeque::new(),
            curve: None,
        })
    }

    pub fn smoothness(&self) -> f64 {
        self.smoothness
    }

    fn begin_drawing(&mut self) {
        if self.start_pending {
            self.start_pending = false;
            self.queue.push_back(self.subpath_start);
        }
    }

    fn advance(&mut self, instruction: DrawingInstruction) {
        match instruction {
            DrawingInstruction::MoveTo(p) => {
                self.current = p;
                self.subpath_start = p;
                self.start_pending = true;
            }
            DrawingInstruction::LineTo(p) => {
                self.begin_drawing();
                self.queue.push_back(p);
                self.current = p;
            }
            DrawingInstruction::CubicCurveTo { ctrl1, ctrl2, to } => {
                self.begin_drawing();
                let segment = CubicBezier::new(self.current, ctrl1, ctrl2, to);
                self.curve = Some(segment.flattened(self.smoothness));
                self.current = to;
            }
            DrawingInstruction::ClosePath => {
                self.begin_drawing();
                self.queue.push_back(self.subpath_start);
                self.current = self.subpath_start;
            }
        }
    }
}

impl Iterator for PointGenerator {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if let Some(p) = self.queue.pop_front() {
                return Some(self.transform.apply(&p));
            }
            if let Some(curve) = self.curve.as_mut() {
                match curve.next() {
                    Some(p) => return Some(self.transform.apply(&p)),
                    None => self.curve = None,
                }
            }
            let instruction = self.instructions.next()?;
            self.advance(instruction);
        }
    }
}

/// Start generating points for path data `d`.
pub fn generate_points(
    d: &str,
    transform: Option<Transform>,
    smoothness: f64,
) -> Result<PointGenerator, PathError> {
    PointGenerator::new(d, transform, smoothness)
}

/// Collect all points of `d`; any error is logged and yields no points.
pub fn collect_points(d: &str, transform: Option<Transform>, smoothness: f64) -> Vec<Point> {
    match generate_points(d, transform, smoothness) {
        Ok(points) => points.collect(),
        Err(e) => {
            warn!("Discarding shape: {}", e);
            Vec::new()
        }
    }
}
