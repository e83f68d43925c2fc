//! Path data parser.
//!
//! Lowers every supported command to four absolute drawing instructions.
//! Relative coordinates are resolved against the running current point,
//! `H`/`V` become lines, quadratics are degree-elevated and arcs are
//! converted to cubics.

use std::collections::VecDeque;

use svgplot_core::{PathError, Point};
use tracing::{debug, warn};

use super::tokenizer::{Token, Tokenizer};
use crate::geometry::{ArcConversion, CubicBezier, SvgArc};

/// An absolute drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawingInstruction {
    MoveTo(Point),
    LineTo(Point),
    CubicCurveTo { ctrl1: Point, ctrl2: Point, to: Point },
    ClosePath,
}

/// Lazy parser over path data.
///
/// Yields instructions one command at a time. A fatal error (bad argument
/// count, malformed number) is yielded once and ends the iteration. Unknown
/// commands, stray characters and degenerate arcs do not interrupt parsing;
/// they are collected in [`PathParser::diagnostics`].
#[derive(Debug, Clone)]
pub struct PathParser<'a> {
    source: &'a str,
    tokens: Tokenizer<'a>,
    pending: VecDeque<DrawingInstruction>,
    current: Point,
    subpath_start: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
    diagnostics: Vec<PathError>,
    finished: bool,
}

impl<'a> PathParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Tokenizer::new(source),
            pending: VecDeque::new(),
            current: Point::ORIGIN,
            subpath_start: Point::ORIGIN,
            last_cubic_ctrl: None,
            last_quad_ctrl: None,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    /// Non-fatal problems seen so far.
    pub fn diagnostics(&self) -> &[PathError] {
        &self.diagnostics
    }

    fn record(&mut self, error: PathError) {
        warn!("{}", error);
        self.diagnostics.push(error);
    }

    /// Consume the number tokens following `command`. The large-arc and
    /// sweep positions of an arc group are read as single-character flags.
    fn read_arguments(&mut self, command: char) -> Result<Vec<f64>, PathError> {
        let is_arc = command.eq_ignore_ascii_case(&'a');
        let mut args = Vec::new();
        loop {
            if is_arc && matches!(args.len() % 7, 3 | 4) {
                if let Some((_, flag)) = self.tokens.next_flag() {
                    args.push(if flag { 1.0 } else { 0.0 });
                    continue;
                }
            }
            match self.tokens.clone().next() {
                Some((_, Ok(Token::Number(n)))) => {
                    args.push(n);
                    self.tokens.next();
                }
                Some((_, Err(e))) if !e.is_fatal() => {
                    self.tokens.next();
                    self.record(e);
                }
                Some((_, Err(e))) => return Err(e),
                _ => return Ok(args),
            }
        }
    }

    /// Read one command and queue its instructions.
    fn read_command(&mut self) -> Result<(), PathError> {
        let Some((offset, token)) = self.tokens.next() else {
            self.finished = true;
            return Ok(());
        };

        let command = match token {
            Ok(Token::Command(c)) => c,
            Ok(Token::Number(_)) => {
                let character = self.source[offset..].chars().next().unwrap_or('?');
                self.record(PathError::UnexpectedCharacter { character, offset });
                return Ok(());
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                self.record(e);
                return Ok(());
            }
        };

        let args = self.read_arguments(command)?;
        let Some(group_size) = group_size(command) else {
            self.record(PathError::UnknownCommand { command, offset });
            return Ok(());
        };

        let malformed = if group_size == 0 {
            !args.is_empty()
        } else {
            args.is_empty() || args.len() % group_size != 0
        };
        if malformed {
            return Err(PathError::ArgumentCount {
                command: command.to_string(),
                group_size,
                found: args.len(),
            });
        }

        if group_size == 0 {
            self.close_path();
            return Ok(());
        }

        let relative = command.is_ascii_lowercase();
        for (index, group) in args.chunks(group_size).enumerate() {
            self.apply(command.to_ascii_uppercase(), relative, index, group);
        }
        Ok(())
    }

    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn apply(&mut self, command: char, relative: bool, index: usize, g: &[f64]) {
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        match command {
            'M' if index == 0 => {
                let p = self.resolve(relative, g[0], g[1]);
                self.subpath_start = p;
                self.current = p;
                self.pending.push_back(DrawingInstruction::MoveTo(p));
            }
            'M' | 'L' => {
                let p = self.resolve(relative, g[0], g[1]);
                self.line_to(p);
            }
            'H' => {
                let x = if relative { self.current.x + g[0] } else { g[0] };
                self.line_to(Point::new(x, self.current.y));
            }
            'V' => {
                let y = if relative { self.current.y + g[0] } else { g[0] };
                self.line_to(Point::new(self.current.x, y));
            }
            'C' => {
                let ctrl1 = self.resolve(relative, g[0], g[1]);
                let ctrl2 = self.resolve(relative, g[2], g[3]);
                let to = self.resolve(relative, g[4], g[5]);
                self.cubic_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
            }
            'S' => {
                let ctrl1 = self
                    .last_cubic_ctrl
                    .map_or(self.current, |c| c.reflect_about(&self.current));
                let ctrl2 = self.resolve(relative, g[0], g[1]);
                let to = self.resolve(relative, g[2], g[3]);
                self.cubic_to(ctrl1, ctrl2, to);
                cubic_ctrl = Some(ctrl2);
            }
            'Q' => {
                let ctrl = self.resolve(relative, g[0], g[1]);
                let to = self.resolve(relative, g[2], g[3]);
                self.quad_to(ctrl, to);
                quad_ctrl = Some(ctrl);
            }
            'T' => {
                let ctrl = self
                    .last_quad_ctrl
                    .map_or(self.current, |c| c.reflect_about(&self.current));
                let to = self.resolve(relative, g[0], g[1]);
                self.quad_to(ctrl, to);
                quad_ctrl = Some(ctrl);
            }
            'A' => {
                let arc = SvgArc {
                    from: self.current,
                    to: self.resolve(relative, g[5], g[6]),
                    rx: g[0],
                    ry: g[1],
                    x_rotation: g[2],
                    large_arc: g[3] != 0.0,
                    sweep: g[4] != 0.0,
                };
                self.arc_to(&arc);
            }
            _ => {}
        }

        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
    }

    fn line_to(&mut self, p: Point) {
        self.current = p;
        self.pending.push_back(DrawingInstruction::LineTo(p));
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.current = to;
        self.pending
            .push_back(DrawingInstruction::CubicCurveTo { ctrl1, ctrl2, to });
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        let cubic = CubicBezier::from_quadratic(self.current, ctrl, to);
        self.cubic_to(cubic.ctrl1, cubic.ctrl2, cubic.to);
    }

    fn arc_to(&mut self, arc: &SvgArc) {
        match arc.to_cubics() {
            ArcConversion::Empty => {
                debug!("Skipping arc with coincident endpoints at {}", arc.from);
                self.diagnostics.push(PathError::DegenerateGeometry {
                    reason: format!("arc endpoints coincide at {}", arc.from),
                });
            }
            ArcConversion::Line(to) => {
                debug!("Arc with zero radius drawn as line to {}", to);
                self.diagnostics.push(PathError::DegenerateGeometry {
                    reason: format!("zero arc radius, line to {}", to),
                });
                self.line_to(to);
            }
            ArcConversion::Cubics(cubics) => {
                for c in cubics {
                    self.cubic_to(c.ctrl1, c.ctrl2, c.to);
                }
            }
        }
    }

    fn close_path(&mut self) {
        self.current = self.subpath_start;
        self.last_cubic_ctrl = None;
        self.last_quad_ctrl = None;
        self.pending.push_back(DrawingInstruction::ClosePath);
    }
}

impl Iterator for PathParser<'_> {
    type Item = Result<DrawingInstruction, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(instruction) = self.pending.pop_front() {
                return Some(Ok(instruction));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.read_command() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

fn group_size(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'Z' => Some(0),
        'H' | 'V' => Some(1),
        'M' | 'L' | 'T' => Some(2),
        'S' | 'Q' => Some(4),
        'C' => Some(6),
        'A' => Some(7),
        _ => None,
    }
}

/// Parse a whole path eagerly, stopping at the first fatal error.
pub fn parse_path(d: &str) -> Result<Vec<DrawingInstruction>, PathError> {
    PathParser::new(d).collect()
}
