use lyon::algorithms::aabb;
use lyon::path::Path;
use serde::{Deserialize, Serialize};

mod icon;
mod ruler;
mod structure;

use crate::icon_path::septic_path;
pub use crate::geometry::{rotate_point, Point};
pub use icon::{IconShape, WELL_MARKER_RADIUS};
pub use ruler::RulerShape;
pub use structure::StructureShape;

/// Common behaviour of every annotation kind.
pub trait AnnotationShape {
    /// Outline in pixel space, used for rasterisation.
    fn render(&self) -> Path;
    /// Axis-aligned `(min_x, min_y, max_x, max_y)`.
    fn bounds(&self) -> (f64, f64, f64, f64);
    /// Reference point that drags and transforms move.
    fn anchor(&self) -> Point;
    fn translate(&mut self, dx: f64, dy: f64);
    /// Merges the fields of `patch` this kind carries; others are ignored.
    fn apply_patch(&mut self, patch: &ShapePatch);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Well,
    Septic,
    Structure,
    Ruler,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Well => "well",
            ShapeKind::Septic => "septic",
            ShapeKind::Structure => "structure",
            ShapeKind::Ruler => "ruler",
        }
    }

    /// Whether a selected shape of this kind shows the resize/rotate overlay.
    pub fn is_transformable(&self) -> bool {
        matches!(self, ShapeKind::Structure | ShapeKind::Septic)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Well(IconShape),
    Septic(IconShape),
    Structure(StructureShape),
    Ruler(RulerShape),
}

impl AnnotationShape for Shape {
    fn render(&self) -> Path {
        match self {
            Shape::Well(s) => s.marker_outline(),
            Shape::Septic(s) => s.glyph_outline(septic_path()),
            Shape::Structure(s) => s.render(),
            Shape::Ruler(s) => s.render(),
        }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Well(_) | Shape::Septic(_) => {
                let b = aabb::bounding_box(self.render().iter());
                (
                    b.min.x as f64,
                    b.min.y as f64,
                    b.max.x as f64,
                    b.max.y as f64,
                )
            }
            Shape::Structure(s) => s.bounds(),
            Shape::Ruler(s) => s.bounds(),
        }
    }

    fn anchor(&self) -> Point {
        match self {
            Shape::Well(s) => s.anchor(),
            Shape::Septic(s) => s.anchor(),
            Shape::Structure(s) => s.anchor(),
            Shape::Ruler(s) => s.anchor(),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Well(s) => s.translate(dx, dy),
            Shape::Septic(s) => s.translate(dx, dy),
            Shape::Structure(s) => s.translate(dx, dy),
            Shape::Ruler(s) => s.translate(dx, dy),
        }
    }

    fn apply_patch(&mut self, patch: &ShapePatch) {
        match self {
            Shape::Well(s) => s.apply_patch(patch),
            Shape::Septic(s) => s.apply_patch(patch),
            Shape::Structure(s) => s.apply_patch(patch),
            Shape::Ruler(s) => s.apply_patch(patch),
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Well(_) => ShapeKind::Well,
            Shape::Septic(_) => ShapeKind::Septic,
            Shape::Structure(_) => ShapeKind::Structure,
            Shape::Ruler(_) => ShapeKind::Ruler,
        }
    }

    pub fn as_structure(&self) -> Option<&StructureShape> {
        match self {
            Shape::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ruler(&self) -> Option<&RulerShape> {
        match self {
            Shape::Ruler(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_icon(&self) -> Option<&IconShape> {
        match self {
            Shape::Well(s) | Shape::Septic(s) => Some(s),
            _ => None,
        }
    }
}

/// Partial attribute update.
///
/// Only the fields that are `Some` are merged into a record; everything else
/// is left untouched. This is what lets a drag move `x`/`y` without
/// disturbing `width`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub rotation: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
}

impl ShapePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn end(x2: f64, y2: f64) -> Self {
        Self {
            x2: Some(x2),
            y2: Some(y2),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_end(mut self, x2: f64, y2: f64) -> Self {
        self.x2 = Some(x2);
        self.y2 = Some(y2);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = Some(scale_x);
        self.scale_y = Some(scale_y);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drops non-finite fields and clamps negative dimensions to zero.
    ///
    /// Returns the cleaned patch and whether any field had to be dropped.
    pub fn sanitized(&self) -> (Self, bool) {
        let mut dropped = false;
        let mut keep = |v: Option<f64>| match v {
            Some(n) if !n.is_finite() => {
                dropped = true;
                None
            }
            other => other,
        };

        let mut out = Self {
            x: keep(self.x),
            y: keep(self.y),
            x2: keep(self.x2),
            y2: keep(self.y2),
            width: keep(self.width),
            length: keep(self.length),
            rotation: keep(self.rotation),
            scale_x: keep(self.scale_x),
            scale_y: keep(self.scale_y),
        };
        out.width = out.width.map(|w| w.max(0.0));
        out.length = out.length.map(|l| l.max(0.0));
        (out, dropped)
    }
}
