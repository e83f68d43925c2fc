//! Cubic Bezier segments and their flattening.
//!
//! Flattening uses recursive midpoint subdivision: a segment is emitted as a
//! single chord once both control points lie within `tolerance` of the chord,
//! otherwise it is split in half and each half is tested again. Lowering the
//! tolerance can only ever split more nodes of the same subdivision tree, so
//! point density grows monotonically as the tolerance shrinks.

use serde::{Deserialize, Serialize};
use svgplot_core::Point;

/// Hard limit on subdivision depth (at most 2^16 chords per segment).
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// A cubic Bezier segment with absolute control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezier {
    pub fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Degree-elevate a quadratic segment into the equivalent cubic.
    pub fn from_quadratic(from: Point, ctrl: Point, to: Point) -> Self {
        let ctrl1 = from.lerp(&ctrl, 2.0 / 3.0);
        let ctrl2 = to.lerp(&ctrl, 2.0 / 3.0);
        Self::new(from, ctrl1, ctrl2, to)
    }

    /// A straight line expressed as a cubic.
    pub fn line(from: Point, to: Point) -> Self {
        Self::new(from, from.lerp(&to, 1.0 / 3.0), from.lerp(&to, 2.0 / 3.0), to)
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.from.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.to.x,
            a * self.from.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.to.y,
        )
    }

    /// Split at `t` with de Casteljau's algorithm.
    ///
    /// The outer endpoints are copied, not recomputed, so repeated splitting
    /// never drifts away from the unsplit `from`/`to`.
    pub fn split(&self, t: f64) -> (CubicBezier, CubicBezier) {
        let p01 = self.from.lerp(&self.ctrl1, t);
        let p12 = self.ctrl1.lerp(&self.ctrl2, t);
        let p23 = self.ctrl2.lerp(&self.to, t);
        let p012 = p01.lerp(&p12, t);
        let p123 = p12.lerp(&p23, t);
        let mid = p012.lerp(&p123, t);
        (
            CubicBezier::new(self.from, p01, p012, mid),
            CubicBezier::new(mid, p123, p23, self.to),
        )
    }

    /// Maximum distance of either control point from the chord `from → to`.
    pub fn flatness(&self) -> f64 {
        distance_to_segment(&self.ctrl1, &self.from, &self.to)
            .max(distance_to_segment(&self.ctrl2, &self.from, &self.to))
    }

    /// Lazily flatten into points, excluding `from` and ending exactly at `to`.
    pub fn flattened(&self, tolerance: f64) -> Flattened {
        Flattened {
            stack: vec![(*self, 0)],
            tolerance,
        }
    }

    /// Like [`CubicBezier::flattened`] but starting with `from`.
    pub fn flattened_inclusive(&self, tolerance: f64) -> impl Iterator<Item = Point> {
        std::iter::once(self.from).chain(self.flattened(tolerance))
    }
}

/// Iterator over the chord endpoints of a flattened cubic.
#[derive(Debug, Clone)]
pub struct Flattened {
    stack: Vec<(CubicBezier, u32)>,
    tolerance: f64,
}

impl Iterator for Flattened {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while let Some((segment, depth)) = self.stack.pop() {
            if depth >= MAX_SUBDIVISION_DEPTH || segment.flatness() <= self.tolerance {
                return Some(segment.to);
            }
            let (first, second) = segment.split(0.5);
            self.stack.push((second, depth + 1));
            self.stack.push((first, depth + 1));
        }
        None
    }
}

fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}
