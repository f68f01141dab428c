use lyon::math::{point, vector, Angle, Transform};
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{Point, ShapePatch};

/// Radius of the well marker before visual scaling.
pub const WELL_MARKER_RADIUS: f64 = 8.0;

/// Point-anchored icon used for wells and septic fields.
///
/// `scale_x`/`scale_y` are purely visual and unrelated to the calibrated
/// pixels-per-foot ratio. `width`/`length` are never dimensioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation angle in degrees about the anchor
    pub rotation: f64,
}

impl IconShape {
    pub fn new(anchor: Point, size: f64, scale: f64) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            width: size,
            length: size,
            scale_x: scale,
            scale_y: scale,
            rotation: 0.0,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Local-to-pixel transform: scale, rotate about the anchor, then move
    /// to the anchor.
    pub fn transform(&self) -> Transform {
        Transform::scale(self.scale_x as f32, self.scale_y as f32)
            .then_rotate(Angle::degrees(self.rotation as f32))
            .then_translate(vector(self.x as f32, self.y as f32))
    }

    /// Circle marker centred on the anchor.
    pub fn marker_outline(&self) -> Path {
        let mut builder = Path::builder();
        builder.add_ellipse(
            point(self.x as f32, self.y as f32),
            vector(
                (WELL_MARKER_RADIUS * self.scale_x.abs()) as f32,
                (WELL_MARKER_RADIUS * self.scale_y.abs()) as f32,
            ),
            Angle::degrees(self.rotation as f32),
            lyon::path::Winding::Positive,
        );
        builder.build()
    }

    /// `glyph` placed at the anchor with this icon's scale and rotation.
    pub fn glyph_outline(&self, glyph: &Path) -> Path {
        glyph.clone().transformed(&self.transform())
    }

    pub fn apply_patch(&mut self, patch: &ShapePatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w;
        }
        if let Some(l) = patch.length {
            self.length = l;
        }
        if let Some(sx) = patch.scale_x {
            self.scale_x = sx;
        }
        if let Some(sy) = patch.scale_y {
            self.scale_y = sy;
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
    }
}
