//! Drawable scene emitted for each render pass.
//!
//! The scene is a flat list of primitives in paint order, with literal
//! pixel coordinates. A rendering surface only has to paint it and report
//! back which node id was under the pointer.

use crate::designer_state::DesignerState;
use crate::geometry::{rotate_point, Point};
use crate::icon_path::septic_bounds;
use crate::labels::{labels_for, LabelLayout};
use crate::model::{IconShape, Shape, StructureShape, WELL_MARKER_RADIUS};
use image::RgbaImage;
use siteplan_core::constants::{
    CALIBRATION_POINT_RADIUS, LABEL_FONT_SIZE, RULER_HANDLE_RADIUS, RULER_HITBOX_WIDTH,
};

/// Prefix shared by every transform overlay node id.
pub const TRANSFORMER_PREFIX: &str = "transformer_";

const HANDLE_SIZE: f64 = 10.0;
const ROTATER_OFFSET: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BROWN: Color = Color::rgb(165, 42, 42);
    pub const OVERLAY: Color = Color::rgb(0, 161, 255);
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Alternating dash/gap lengths, solid when `None`.
    pub dash: Option<Vec<f64>>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawStyle {
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
}

impl DrawStyle {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn stroke(stroke: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// The background raster, drawn at the origin.
    Image { width: u32, height: u32 },
    Line { points: Vec<Point>, closed: bool },
    Circle { center: Point, radius: f64 },
    /// Rectangle anchored at its top-left corner and rotated about it.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rotation: f64,
    },
    /// The fixed septic icon path, scaled and rotated about `(x, y)`.
    Icon {
        x: f64,
        y: f64,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
    },
    /// Text whose origin is `position - offset`, rotated about `position`.
    Text {
        text: String,
        position: Point,
        offset: Point,
        rotation: f64,
        font_size: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Id reported back on hit, `None` for decoration.
    pub node_id: Option<String>,
    pub primitive: Primitive,
    pub style: DrawStyle,
    /// Whether the primitive takes part in hit-testing.
    pub listening: bool,
}

impl Drawable {
    fn new(node_id: impl Into<String>, primitive: Primitive, style: DrawStyle) -> Self {
        Self {
            node_id: Some(node_id.into()),
            primitive,
            style,
            listening: true,
        }
    }

    fn decoration(primitive: Primitive, style: DrawStyle) -> Self {
        Self {
            node_id: None,
            primitive,
            style,
            listening: false,
        }
    }
}

/// Visual parameters for scene construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub label_font_size: f64,
    pub labels: LabelLayout,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            label_font_size: LABEL_FONT_SIZE,
            labels: LabelLayout::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub width: u32,
    pub height: u32,
    pub background: Option<&'a RgbaImage>,
    pub drawables: Vec<Drawable>,
}

impl Scene<'_> {
    pub fn find(&self, node_id: &str) -> Option<&Drawable> {
        self.drawables
            .iter()
            .find(|d| d.node_id.as_deref() == Some(node_id))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.drawables.iter().filter_map(|d| d.node_id.as_deref())
    }
}

/// Builds the scene for the current designer state.
pub fn build_scene(state: &DesignerState) -> Scene<'_> {
    let canvas = &state.canvas;
    let style = &state.scene_style;
    let (width, height) = canvas.size();
    let mut drawables = Vec::new();

    if let Some(bg) = canvas.background() {
        drawables.push(Drawable::decoration(
            Primitive::Image {
                width: bg.width(),
                height: bg.height(),
            },
            DrawStyle::default(),
        ));
    }

    if let Some((from, to)) = state.calibration.preview_segment() {
        drawables.push(Drawable::decoration(
            Primitive::Line {
                points: vec![from, to],
                closed: false,
            },
            DrawStyle::stroke(StrokeStyle {
                color: Color::RED,
                width: 2.0,
                dash: Some(vec![4.0, 4.0]),
            }),
        ));
    }
    for point in state.calibration.points() {
        drawables.push(Drawable::decoration(
            Primitive::Circle {
                center: *point,
                radius: CALIBRATION_POINT_RADIUS,
            },
            DrawStyle::fill(Color::RED),
        ));
    }

    for record in canvas.shapes() {
        let id = record.id;
        match &record.shape {
            Shape::Well(icon) => drawables.push(Drawable::new(
                id.to_string(),
                Primitive::Circle {
                    center: icon.anchor(),
                    radius: WELL_MARKER_RADIUS * icon.scale_x,
                },
                DrawStyle::fill(Color::BLUE),
            )),
            Shape::Septic(icon) => drawables.push(Drawable::new(
                id.to_string(),
                Primitive::Icon {
                    x: icon.x,
                    y: icon.y,
                    scale_x: icon.scale_x,
                    scale_y: icon.scale_y,
                    rotation: icon.rotation,
                },
                DrawStyle {
                    fill: Some(Color::GREEN),
                    stroke: Some(StrokeStyle::solid(Color::BLACK, 2.0)),
                },
            )),
            Shape::Structure(s) => drawables.push(Drawable::new(
                id.to_string(),
                Primitive::Rect {
                    x: s.x,
                    y: s.y,
                    width: s.width,
                    height: s.length,
                    rotation: s.rotation,
                },
                DrawStyle::fill(Color::BROWN),
            )),
            Shape::Ruler(r) => {
                let points = vec![r.start(), r.end()];
                drawables.push(Drawable::new(
                    format!("{}_body", id),
                    Primitive::Line {
                        points: points.clone(),
                        closed: false,
                    },
                    DrawStyle::stroke(StrokeStyle::solid(Color::TRANSPARENT, RULER_HITBOX_WIDTH)),
                ));
                drawables.push(Drawable {
                    node_id: Some(id.to_string()),
                    primitive: Primitive::Line {
                        points,
                        closed: false,
                    },
                    style: DrawStyle::stroke(StrokeStyle::solid(Color::BLACK, 2.0)),
                    listening: false,
                });
                for (suffix, center) in [("start", r.start()), ("end", r.end())] {
                    drawables.push(Drawable::new(
                        format!("{}_{}", id, suffix),
                        Primitive::Circle {
                            center,
                            radius: RULER_HANDLE_RADIUS,
                        },
                        DrawStyle::fill(Color::BLUE),
                    ));
                }
            }
        }

        for label in labels_for(record, state.calibration.scale_factor(), &style.labels) {
            if state.label_editor.is_editing(label.shape_id, label.field) {
                continue;
            }
            // Ruler labels are centred on their anchor
            let offset = match record.shape {
                Shape::Ruler(_) => Point::new(label.text.chars().count() as f64 * 3.0, 7.0),
                _ => Point::default(),
            };
            drawables.push(Drawable::new(
                label.node_id(),
                Primitive::Text {
                    text: label.text,
                    position: label.position,
                    offset,
                    rotation: label.rotation,
                    font_size: style.label_font_size,
                },
                DrawStyle::fill(Color::BLACK),
            ));
        }
    }

    let selected = canvas
        .selected_id()
        .and_then(|id| canvas.get_shape(id))
        .filter(|record| record.kind().is_transformable());
    if let Some(record) = selected {
        if let Some(frame) = transform_frame(&record.shape) {
            push_transformer(&mut drawables, &frame);
        }
    }

    Scene {
        width,
        height,
        background: canvas.background(),
        drawables,
    }
}

/// Oriented box a transform overlay wraps: origin corner, size, rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformFrame {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl TransformFrame {
    /// Maps a point in the frame's unrotated local space to pixels.
    pub fn local_to_pixel(&self, u: f64, v: f64) -> Point {
        rotate_point(self.origin.offset(u, v), self.rotation, self.origin)
    }
}

/// Overlay frame for shapes that can be resized and rotated.
pub fn transform_frame(shape: &Shape) -> Option<TransformFrame> {
    match shape {
        Shape::Structure(s) => Some(structure_frame(s)),
        Shape::Septic(icon) => Some(septic_frame(icon)),
        _ => None,
    }
}

fn structure_frame(s: &StructureShape) -> TransformFrame {
    TransformFrame {
        origin: Point::new(s.x, s.y),
        width: s.width,
        height: s.length,
        rotation: s.rotation,
    }
}

fn septic_frame(icon: &IconShape) -> TransformFrame {
    let glyph = septic_bounds();
    let anchor = icon.anchor();
    let local_min = Point::new(
        glyph.min.x as f64 * icon.scale_x,
        glyph.min.y as f64 * icon.scale_y,
    );
    TransformFrame {
        origin: rotate_point(anchor.offset(local_min.x, local_min.y), icon.rotation, anchor),
        width: (glyph.max.x - glyph.min.x) as f64 * icon.scale_x.abs(),
        height: (glyph.max.y - glyph.min.y) as f64 * icon.scale_y.abs(),
        rotation: icon.rotation,
    }
}

fn push_transformer(drawables: &mut Vec<Drawable>, frame: &TransformFrame) {
    let (w, h) = (frame.width, frame.height);
    let border: Vec<Point> = [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]
        .into_iter()
        .map(|(u, v)| frame.local_to_pixel(u, v))
        .collect();
    drawables.push(Drawable::decoration(
        Primitive::Line {
            points: border,
            closed: true,
        },
        DrawStyle::stroke(StrokeStyle::solid(Color::OVERLAY, 1.0)),
    ));

    let anchors = [
        ("top-left", 0.0, 0.0),
        ("top-center", w / 2.0, 0.0),
        ("top-right", w, 0.0),
        ("middle-right", w, h / 2.0),
        ("bottom-right", w, h),
        ("bottom-center", w / 2.0, h),
        ("bottom-left", 0.0, h),
        ("middle-left", 0.0, h / 2.0),
        ("rotater", w / 2.0, -ROTATER_OFFSET),
    ];
    for (name, u, v) in anchors {
        let corner = frame.local_to_pixel(u - HANDLE_SIZE / 2.0, v - HANDLE_SIZE / 2.0);
        drawables.push(Drawable::new(
            format!("{}{}", TRANSFORMER_PREFIX, name),
            Primitive::Rect {
                x: corner.x,
                y: corner.y,
                width: HANDLE_SIZE,
                height: HANDLE_SIZE,
                rotation: frame.rotation,
            },
            DrawStyle {
                fill: Some(Color::WHITE),
                stroke: Some(StrokeStyle::solid(Color::OVERLAY, 1.0)),
            },
        ));
    }
}
