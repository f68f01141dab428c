//! Pixel-space geometry helpers.
//!
//! All coordinates are screen pixels with the y axis pointing down, so a
//! positive rotation turns clockwise on screen.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between this point and `other`.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Rotates `point` about `center` by `rotation_deg` degrees.
///
/// Clockwise-positive in y-down screen coordinates, matching every shape's
/// `rotation` attribute.
pub fn rotate_point(point: Point, rotation_deg: f64, center: Point) -> Point {
    let rad = rotation_deg.to_radians();
    let (s, c) = rad.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point {
        x: center.x + dx * c - dy * s,
        y: center.y + dx * s + dy * c,
    }
}

/// Euclidean distance between two points.
pub fn line_length(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Angle of the segment `p1 -> p2` in degrees, folded into `(-90, 90]`.
///
/// Text laid along the segment at this angle always reads left to right.
pub fn line_angle_degrees(p1: Point, p2: Point) -> f64 {
    let angle = (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees();
    fold_half_turn(angle)
}

pub(crate) fn fold_half_turn(angle: f64) -> f64 {
    if angle > 90.0 {
        angle - 180.0
    } else if angle <= -90.0 {
        angle + 180.0
    } else {
        angle
    }
}
