use lyon::math::point;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{rotate_point, AnnotationShape, Point, ShapePatch};

/// Building footprint.
///
/// Anchored at the top-left corner of its unrotated frame. `width` runs
/// along the local x axis and `length` along the local y axis, both in
/// pixels. `rotation` turns the whole rectangle about the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
    /// Rotation angle in degrees about the anchor
    pub rotation: f64,
}

impl StructureShape {
    pub fn new(anchor: Point, width: f64, length: f64) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            width: width.max(0.0),
            length: length.max(0.0),
            rotation: 0.0,
        }
    }

    /// Corners in pixel space, clockwise from the anchor.
    pub fn corners(&self) -> [Point; 4] {
        let anchor = self.anchor();
        [
            anchor,
            rotate_point(anchor.offset(self.width, 0.0), self.rotation, anchor),
            rotate_point(
                anchor.offset(self.width, self.length),
                self.rotation,
                anchor,
            ),
            rotate_point(anchor.offset(0.0, self.length), self.rotation, anchor),
        ]
    }
}

impl AnnotationShape for StructureShape {
    fn render(&self) -> Path {
        let corners = self.corners();
        let mut builder = Path::builder();
        builder.begin(point(corners[0].x as f32, corners[0].y as f32));
        for c in &corners[1..] {
            builder.line_to(point(c.x as f32, c.y as f32));
        }
        builder.end(true);
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        let corners = self.corners();
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for c in corners {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        (min_x, min_y, max_x, max_y)
    }

    fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    fn apply_patch(&mut self, patch: &ShapePatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w.max(0.0);
        }
        if let Some(l) = patch.length {
            self.length = l.max(0.0);
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
    }
}
