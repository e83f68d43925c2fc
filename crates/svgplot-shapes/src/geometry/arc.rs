//! Elliptical arc to cubic Bezier conversion.
//!
//! Arcs use the SVG endpoint parameterization. Conversion goes through the
//! centre parameterization (SVG 1.1 implementation notes, F.6.5) and then
//! approximates each sweep of at most 90 degrees with one cubic.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};
use svgplot_core::Point;

use super::bezier::CubicBezier;

/// An elliptical arc in SVG endpoint form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SvgArc {
    pub from: Point,
    pub to: Point,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x-axis, in degrees.
    pub x_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Result of lowering an arc.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcConversion {
    /// Start and end coincide; the arc draws nothing.
    Empty,
    /// A zero radius; the arc is a straight line to this point.
    Line(Point),
    /// One cubic per quarter turn (or less).
    Cubics(Vec<CubicBezier>),
}

impl SvgArc {
    /// Convert to cubic Beziers, resolving degenerate input locally.
    pub fn to_cubics(&self) -> ArcConversion {
        if self.from == self.to {
            return ArcConversion::Empty;
        }

        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();
        if rx < f64::EPSILON || ry < f64::EPSILON {
            return ArcConversion::Line(self.to);
        }

        let phi = self.x_rotation.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Step 1: start point in the ellipse's rotated frame.
        let dx2 = (self.from.x - self.to.x) / 2.0;
        let dy2 = (self.from.y - self.to.y) / 2.0;
        let x1p = cos_phi * dx2 + sin_phi * dy2;
        let y1p = -sin_phi * dx2 + cos_phi * dy2;

        // Step 2: grow radii that cannot span the endpoints.
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        // Step 3: centre in the rotated frame.
        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let x1p2 = x1p * x1p;
        let y1p2 = y1p * y1p;
        let denom = rx2 * y1p2 + ry2 * x1p2;
        if denom.abs() < f64::EPSILON {
            return ArcConversion::Line(self.to);
        }
        // Clamp rounding noise when the radii were just scaled up.
        let numer = (rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2).max(0.0);
        let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let coef = sign * (numer / denom).sqrt();
        let cxp = coef * (rx * y1p / ry);
        let cyp = coef * (-ry * x1p / rx);

        // Step 4: centre in user space.
        let center = Point::new(
            cos_phi * cxp - sin_phi * cyp + (self.from.x + self.to.x) / 2.0,
            sin_phi * cxp + cos_phi * cyp + (self.from.y + self.to.y) / 2.0,
        );

        // Step 5: start angle and sweep.
        let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
        let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
        let theta1 = angle_between((1.0, 0.0), u);
        let mut delta = angle_between(u, v);
        if !self.sweep && delta > 0.0 {
            delta -= TAU;
        } else if self.sweep && delta < 0.0 {
            delta += TAU;
        }

        // Step 6: split into <= 90 degree pieces.
        let segment_count = ((delta.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize;
        let delta_seg = delta / segment_count as f64;
        let k = 4.0 / 3.0 * (delta_seg / 4.0).tan();

        let ellipse = EllipseFrame {
            center,
            rx,
            ry,
            cos_phi,
            sin_phi,
        };

        let mut cubics = Vec::with_capacity(segment_count);
        let mut start = self.from;
        let mut t0 = theta1;
        for i in 0..segment_count {
            let t1 = t0 + delta_seg;
            let (s0, c0) = t0.sin_cos();
            let (s1, c1) = t1.sin_cos();
            let ctrl1 = ellipse.point(c0 - k * s0, s0 + k * c0);
            let ctrl2 = ellipse.point(c1 + k * s1, s1 - k * c1);
            let end = if i + 1 == segment_count {
                self.to
            } else {
                ellipse.point(c1, s1)
            };
            cubics.push(CubicBezier::new(start, ctrl1, ctrl2, end));
            start = end;
            t0 = t1;
        }

        ArcConversion::Cubics(cubics)
    }
}

struct EllipseFrame {
    center: Point,
    rx: f64,
    ry: f64,
    cos_phi: f64,
    sin_phi: f64,
}

impl EllipseFrame {
    /// Map a unit-circle point onto the rotated ellipse.
    fn point(&self, u: f64, v: f64) -> Point {
        Point::new(
            self.center.x + self.cos_phi * (self.rx * u) - self.sin_phi * (self.ry * v),
            self.center.y + self.sin_phi * (self.rx * u) + self.cos_phi * (self.ry * v),
        )
    }
}

fn angle_between(u: (f64, f64), v: (f64, f64)) -> f64 {
    let dot = u.0 * v.0 + u.1 * v.1;
    let det = u.0 * v.1 - u.1 * v.0;
    det.atan2(dot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(from: (f64, f64), to: (f64, f64), r: f64, large: bool, sweep: bool) -> SvgArc {
        SvgArc {
            from: from.into(),
            to: to.into(),
            rx: r,
            ry: r,
            x_rotation: 0.0,
            large_arc: large,
            sweep,
        }
    }

    #[test]
    fn test_zero_radius_is_line() {
        let result = arc((0.0, 0.0), (10.0, 0.0), 0.0, false, true).to_cubics();
        assert_eq!(result, ArcConversion::Line(Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_coincident_endpoints_is_empty() {
        let result = arc((5.0, 5.0), (5.0, 5.0), 10.0, true, true).to_cubics();
        assert_eq!(result, ArcConversion::Empty);
    }

    #[test]
    fn test_half_circle_stays_on_radius() {
        let result = arc((10.0, 50.0), (90.0, 50.0), 40.0, true, false).to_cubics();
        let ArcConversion::Cubics(cubics) = result else {
            panic!("expected cubics");
        };
        assert_eq!(cubics.len(), 2);
        assert_eq!(cubics[0].from, Point::new(10.0, 50.0));
        assert_eq!(cubics[1].to, Point::new(90.0, 50.0));

        let center = Point::new(50.0, 50.0);
        for cubic in &cubics {
            for i in 0..=20 {
                let p = cubic.point_at(i as f64 / 20.0);
                assert!((p.distance_to(&center) - 40.0).abs() < 0.05);
            }
        }
    }

    #[test]
    fn test_sweep_flag_picks_side() {
        let center = Point::new(50.0, 50.0);
        let below = arc((10.0, 50.0), (90.0, 50.0), 40.0, false, false).to_cubics();
        let above = arc((10.0, 50.0), (90.0, 50.0), 40.0, false, true).to_cubics();
        let (ArcConversion::Cubics(below), ArcConversion::Cubics(above)) = (below, above) else {
            panic!("expected cubics");
        };
        let mid_below = below[0].to;
        let mid_above = above[0].to;
        assert!(mid_below.y > center.y);
        assert!(mid_above.y < center.y);
    }

    #[test]
    fn test_small_radius_is_scaled_up() {
        // Radius 1 cannot span 20 units, so the arc becomes a half circle of radius 10.
        let result = arc((0.0, 0.0), (20.0, 0.0), 1.0, false, true).to_cubics();
        let ArcConversion::Cubics(cubics) = result else {
            panic!("expected cubics");
        };
        let center = Point::new(10.0, 0.0);
        for cubic in &cubics {
            let p = cubic.point_at(0.5);
            assert!((p.distance_to(&center) - 10.0).abs() < 0.05);
        }
    }
}
