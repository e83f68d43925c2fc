//! 2D affine transforms and the SVG `transform` attribute syntax.

use std::ops::Mul;

use serde::{Deserialize, Serialize};
use svgplot_core::{PathError, Point};

use crate::path::tokenizer::parse_numbers;

/// A 2D affine transform `[a c e; b d f; 0 0 1]`.
///
/// `a`, `b`, `c`, `d` encode scale, rotation and skew; `e`, `f` translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin; `degrees` follow SVG (clockwise on screen).
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation about `(cx, cy)`.
    pub fn rotate_about(degrees: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy)
            .multiply(&Self::rotate(degrees))
            .multiply(&Self::translate(-cx, -cy))
    }

    pub fn skew_x(degrees: f64) -> Self {
        Self::new(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(degrees: f64) -> Self {
        Self::new(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Matrix product `self × other`: the result applies `other` first.
    pub fn multiply(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, p: &Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.multiply(&rhs)
    }
}

/// Parse an SVG transform list such as `translate(10,20) rotate(45)`.
///
/// Functions compose left to right, so the right-most one is applied to the
/// shape first. Returns `Ok(None)` for an empty declaration.
pub fn parse_transform(source: &str) -> Result<Option<Transform>, PathError> {
    let mut result: Option<Transform> = None;
    let mut rest = source;
    let mut offset = 0usize;

    loop {
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        offset += rest.len() - trimmed.len();
        rest = trimmed;
        if rest.is_empty() {
            break;
        }

        let open = rest.find('(').ok_or_else(|| PathError::UnknownTransform {
            name: rest.trim().to_string(),
        })?;
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| PathError::InvalidNumber {
                token: rest[open..].to_string(),
                offset: offset + open,
            })?;

        let name = rest[..open].trim();
        let args = parse_numbers(&rest[open + 1..close]).map_err(|e| shift_offset(e, offset + open + 1))?;
        let transform = transform_function(name, &args)?;
        result = Some(match result {
            Some(acc) => acc.multiply(&transform),
            None => transform,
        });

        offset += close + 1;
        rest = &rest[close + 1..];
    }

    Ok(result)
}

fn transform_function(name: &str, args: &[f64]) -> Result<Transform, PathError> {
    let arity_error = |group_size: usize| PathError::ArgumentCount {
        command: name.to_string(),
        group_size,
        found: args.len(),
    };

    match name {
        "matrix" => match *args {
            [a, b, c, d, e, f] => Ok(Transform::new(a, b, c, d, e, f)),
            _ => Err(arity_error(6)),
        },
        "translate" => match *args {
            [tx] => Ok(Transform::translate(tx, 0.0)),
            [tx, ty] => Ok(Transform::translate(tx, ty)),
            _ => Err(arity_error(2)),
        },
        "scale" => match *args {
            [s] => Ok(Transform::scale(s, s)),
            [sx, sy] => Ok(Transform::scale(sx, sy)),
            _ => Err(arity_error(2)),
        },
        "rotate" => match *args {
            [angle] => Ok(Transform::rotate(angle)),
            [angle, cx, cy] => Ok(Transform::rotate_about(angle, cx, cy)),
            _ => Err(arity_error(3)),
        },
        "skewX" => match *args {
            [angle] => Ok(Transform::skew_x(angle)),
            _ => Err(arity_error(1)),
        },
        "skewY" => match *args {
            [angle] => Ok(Transform::skew_y(angle)),
            _ => Err(arity_error(1)),
        },
        _ => Err(PathError::UnknownTransform {
            name: name.to_string(),
        }),
    }
}

fn shift_offset(err: PathError, by: usize) -> PathError {
    match err {
        PathError::InvalidNumber { token, offset } => PathError::InvalidNumber {
            token,
            offset: offset + by,
        },
        PathError::UnexpectedCharacter { character, offset } => PathError::UnexpectedCharacter {
            character,
            offset: offset + by,
        },
        other => other,
    }
}
