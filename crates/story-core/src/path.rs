//! Route geometry: a small SVG path-data parser and an arc-length table used
//! to place the moving marker.
//!
//! Curves are flattened into short line segments once at construction, so
//! sampling is a binary search plus a lerp.

use glam::Vec2;

use crate::constants::CURVE_FLATTEN_STEPS;
use crate::error::PathError;

/// Marker placement on the route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoutePosition {
    pub point: Vec2,
    /// Heading in degrees, `atan2(dy, dx)` in screen space (y down).
    pub heading_deg: f32,
}

/// Polyline with cumulative arc lengths.
///
/// A moveto after the first one lifts the pen: the jump to the next subpath
/// adds nothing to the arc length and is never travelled.
#[derive(Clone, Debug)]
pub struct Route {
    points: Vec<Vec2>,
    /// `pen_up[i]` is set when vertex `i` opens a new subpath.
    pen_up: Vec<bool>,
    cumulative: Vec<f32>,
}

impl Route {
    /// Parse SVG path data (`M L H V C Q Z`, absolute or relative).
    pub fn parse(d: &str) -> Result<Self, PathError> {
        let (points, pen_up) = flatten(d)?;
        Self::build(points, pen_up)
    }

    /// Single connected polyline.
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, PathError> {
        let pen_up = vec![false; points.len()];
        Self::build(points, pen_up)
    }

    fn build(points: Vec<Vec2>, pen_up: Vec<bool>) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::ZeroLength);
        }
        let mut cumulative = Vec::with_capacity(points.len());
        let mut acc = 0.0_f32;
        cumulative.push(0.0);
        for (i, pair) in points.windows(2).enumerate() {
            if !pen_up[i + 1] {
                acc += pair[0].distance(pair[1]);
            }
            cumulative.push(acc);
        }
        if acc <= f32::EPSILON {
            return Err(PathError::ZeroLength);
        }
        Ok(Self {
            points,
            pen_up,
            cumulative,
        })
    }

    /// Flattened vertices, in path order.
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Arc length from the start up to each vertex.
    #[inline]
    pub fn vertex_lengths(&self) -> &[f32] {
        &self.cumulative
    }

    /// True when vertex `i` is reached by a moveto rather than drawn to.
    #[inline]
    pub fn starts_subpath(&self, i: usize) -> bool {
        i > 0 && self.pen_up.get(i).copied().unwrap_or(false)
    }

    #[inline]
    pub fn total_length(&self) -> f32 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    pub fn point_at_length(&self, dist: f32) -> Vec2 {
        let dist = dist.clamp(0.0, self.total_length());
        // index of the first vertex at or beyond `dist`
        let hi = self
            .cumulative
            .partition_point(|&c| c < dist)
            .clamp(1, self.points.len() - 1);
        let lo = hi - 1;
        let seg = self.cumulative[hi] - self.cumulative[lo];
        if seg <= f32::EPSILON {
            return self.points[hi];
        }
        let t = (dist - self.cumulative[lo]) / seg;
        self.points[lo].lerp(self.points[hi], t)
    }
}

/// How far ahead of the marker the heading is measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookahead {
    /// Fixed distance in path units (px).
    Distance(f32),
    /// Fraction of the total route length.
    Fraction(f32),
}

impl Lookahead {
    #[inline]
    fn distance(self, total: f32) -> f32 {
        match self {
            Lookahead::Distance(d) => d,
            Lookahead::Fraction(f) => f * total,
        }
    }
}

/// Converts journey progress into a [`RoutePosition`].
#[derive(Clone, Debug)]
pub struct RouteSampler {
    route: Route,
    lookahead: Lookahead,
    end_margin: f32,
}

impl RouteSampler {
    pub fn new(route: Route, lookahead: Lookahead, end_margin: f32) -> Self {
        Self {
            route,
            lookahead,
            end_margin: end_margin.max(0.0),
        }
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn sample(&self, progress: f64) -> RoutePosition {
        let len = self.route.total_length();
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        let dist = (progress * len).min((len - self.end_margin).max(0.0));
        let look = self.lookahead.distance(len).max(f32::EPSILON);
        let ahead = (dist + look).min(len);

        let point = self.route.point_at_length(dist);
        let mut delta = self.route.point_at_length(ahead) - point;
        if delta.length_squared() <= f32::EPSILON {
            // At the very end the lookahead collapses; face along the last stretch instead.
            delta = point - self.route.point_at_length((dist - look).max(0.0));
        }
        RoutePosition {
            point,
            heading_deg: delta.y.atan2(delta.x).to_degrees(),
        }
    }
}

// ---------------- SVG path data ----------------

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_separators();
        self.bytes.get(self.pos).copied()
    }

    fn at_number(&mut self) -> bool {
        matches!(self.peek(), Some(b) if b.is_ascii_digit() || b == b'-' || b == b'+' || b == b'.')
    }

    fn number(&mut self) -> Result<f32, PathError> {
        self.skip_separators();
        let start = self.pos;
        let mut end = start;
        let bytes = self.bytes;
        if matches!(bytes.get(end), Some(b'-') | Some(b'+')) {
            end += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while let Some(&b) = bytes.get(end) {
            if b.is_ascii_digit() {
                seen_digit = true;
                end += 1;
            } else if b == b'.' && !seen_dot {
                seen_dot = true;
                end += 1;
            } else {
                break;
            }
        }
        if matches!(bytes.get(end), Some(b'e') | Some(b'E')) && seen_digit {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'-') | Some(b'+')) {
                exp_end += 1;
            }
            if matches!(bytes.get(exp_end), Some(b) if b.is_ascii_digit()) {
                while matches!(bytes.get(exp_end), Some(b) if b.is_ascii_digit()) {
                    exp_end += 1;
                }
                end = exp_end;
            }
        }
        if !seen_digit {
            return Err(PathError::ExpectedNumber(start));
        }
        let value = std::str::from_utf8(&bytes[start..end])
            .ok()
            .and_then(|text| text.parse::<f32>().ok())
            .ok_or(PathError::ExpectedNumber(start))?;
        self.pos = end;
        Ok(value)
    }

    fn pair(&mut self) -> Result<Vec2, PathError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Vec2::new(x, y))
    }
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    p0 * (inv * inv * inv)
        + p1 * (3.0 * inv * inv * t)
        + p2 * (3.0 * inv * t * t)
        + p3 * (t * t * t)
}

fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    p0 * (inv * inv) + p1 * (2.0 * inv * t) + p2 * (t * t)
}

/// Flattened vertices plus a pen-up flag per vertex.
fn flatten(d: &str) -> Result<(Vec<Vec2>, Vec<bool>), PathError> {
    let mut cur = Cursor::new(d);
    let first = cur.peek().ok_or(PathError::Empty)?;
    if first != b'M' && first != b'm' {
        return Err(PathError::MissingMoveTo(first as char));
    }

    let mut points: Vec<Vec2> = Vec::new();
    let mut pen_up: Vec<bool> = Vec::new();
    let mut pen = Vec2::ZERO;
    let mut subpath_start = Vec2::ZERO;
    let mut command = b'M';

    while let Some(b) = cur.peek() {
        if b.is_ascii_alphabetic() {
            command = b;
            cur.pos += 1;
        } else if !cur.at_number() {
            return Err(PathError::ExpectedNumber(cur.pos));
        }
        let relative = command.is_ascii_lowercase();
        let origin = if relative { pen } else { Vec2::ZERO };

        match command.to_ascii_uppercase() {
            b'M' => {
                pen = origin + cur.pair()?;
                subpath_start = pen;
                points.push(pen);
                pen_up.push(true);
                // Extra coordinate pairs after a moveto are implicit linetos.
                command = if relative { b'l' } else { b'L' };
            }
            b'L' => {
                pen = origin + cur.pair()?;
                points.push(pen);
            }
            b'H' => {
                let x = cur.number()?;
                pen.x = if relative { pen.x + x } else { x };
                points.push(pen);
            }
            b'V' => {
                let y = cur.number()?;
                pen.y = if relative { pen.y + y } else { y };
                points.push(pen);
            }
            b'C' => {
                let c1 = origin + cur.pair()?;
                let c2 = origin + cur.pair()?;
                let end = origin + cur.pair()?;
                for i in 1..=CURVE_FLATTEN_STEPS {
                    let t = i as f32 / CURVE_FLATTEN_STEPS as f32;
                    points.push(cubic(pen, c1, c2, end, t));
                }
                pen = end;
            }
            b'Q' => {
                let c = origin + cur.pair()?;
                let end = origin + cur.pair()?;
                for i in 1..=CURVE_FLATTEN_STEPS {
                    let t = i as f32 / CURVE_FLATTEN_STEPS as f32;
                    points.push(quadratic(pen, c, end, t));
                }
                pen = end;
            }
            b'Z' => {
                pen = subpath_start;
                points.push(pen);
                // Z takes no arguments; a number right after it is malformed.
                if cur.at_number() {
                    return Err(PathError::UnexpectedNumber(cur.pos));
                }
            }
            other => return Err(PathError::UnsupportedCommand(other as char)),
        }
        // only a moveto lifts the pen
        pen_up.resize(points.len(), false);
    }
    Ok((points, pen_up))
}
