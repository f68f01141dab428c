use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{AnnotationShape, Point, ShapePatch};
use crate::geometry::{line_angle_degrees, line_length};

/// Measuring segment between two free endpoints.
///
/// Orientation is derived from the endpoint delta; there is no rotation
/// attribute. The endpoints may coincide, in which case the ruler reads
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulerShape {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RulerShape {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            x: start.x,
            y: start.y,
            x2: end.x,
            y2: end.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn midpoint(&self) -> Point {
        self.start().midpoint(&self.end())
    }

    /// Pixel length of the segment.
    pub fn length(&self) -> f64 {
        line_length(self.start(), self.end())
    }

    /// Raw direction angle in radians, unfolded.
    pub fn direction_radians(&self) -> f64 {
        (self.y2 - self.y).atan2(self.x2 - self.x)
    }

    /// Label angle in degrees, folded into `(-90, 90]`.
    pub fn label_angle_degrees(&self) -> f64 {
        line_angle_degrees(self.start(), self.end())
    }

    /// Far endpoint that gives the segment `new_length` pixels while keeping
    /// the start and direction. A zero-length ruler extends along +x.
    pub fn end_for_length(&self, new_length: f64) -> Point {
        let old_length = self.length();
        if old_length <= f64::EPSILON {
            return self.start().offset(new_length, 0.0);
        }
        let ratio = new_length / old_length;
        Point::new(
            self.x + (self.x2 - self.x) * ratio,
            self.y + (self.y2 - self.y) * ratio,
        )
    }
}

impl AnnotationShape for RulerShape {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.begin(point(self.x as f32, self.y as f32));
        builder.line_to(point(self.x2 as f32, self.y2 as f32));
        builder.end(false);
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.x.min(self.x2),
            self.y.min(self.y2),
            self.x.max(self.x2),
            self.y.max(self.y2),
        )
    }

    fn anchor(&self) -> Point {
        self.start()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    fn apply_patch(&mut self, patch: &ShapePatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(x2) = patch.x2 {
            self.x2 = x2;
        }
        if let Some(y2) = patch.y2 {
            self.y2 = y2;
        }
    }
}
