//! Raster export of a scene.
//! Paints scene primitives with tiny-skia and encodes the result as PNG.
//!
//! Features:
//! - Anti-aliased rendering
//! - Output scaled by a pixel ratio
//! - Background image composited at the origin
//! - Labels drawn with a system font through rusttype

use crate::font_manager;
use crate::geometry::Point;
use crate::icon_path::septic_path;
use crate::scene::{Color, DrawStyle, Drawable, Primitive, Scene, StrokeStyle};
use image::{ImageFormat, RgbaImage};
use rusttype::{point as rt_point, Scale};
use siteplan_core::ExportError;
use std::io::Cursor;
use tiny_skia::{
    ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, StrokeDash,
    Transform,
};

/// Produces raster bytes for the current scene.
pub trait ExportAdapter {
    fn render_to_image(&self, scene: &Scene<'_>, pixel_ratio: f64) -> Result<Vec<u8>, ExportError>;
}

/// PNG exporter backed by tiny-skia.
#[derive(Debug, Clone)]
pub struct PngExporter {
    /// Colour under everything, visible where there is no background image.
    pub clear_color: Color,
}

impl Default for PngExporter {
    fn default() -> Self {
        Self {
            clear_color: Color::WHITE,
        }
    }
}

fn skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn skia_stroke(style: &StrokeStyle) -> Stroke {
    let mut stroke = Stroke {
        width: style.width as f32,
        ..Default::default()
    };
    if let Some(dash) = &style.dash {
        stroke.dash = StrokeDash::new(dash.iter().map(|d| *d as f32).collect(), 0.0);
    }
    stroke
}

/// Converts a lyon path to a tiny-skia path.
fn skia_path(path: &lyon::path::Path) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for event in path.iter() {
        match event {
            lyon::path::Event::Begin { at } => pb.move_to(at.x, at.y),
            lyon::path::Event::Line { to, .. } => pb.line_to(to.x, to.y),
            lyon::path::Event::Quadratic { ctrl, to, .. } => pb.quad_to(ctrl.x, ctrl.y, to.x, to.y),
            lyon::path::Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => pb.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y),
            lyon::path::Event::End { close, .. } => {
                if close {
                    pb.close();
                }
            }
        }
    }
    pb.finish()
}

fn polyline(points: &[Point], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn paint_path(pixmap: &mut Pixmap, path: &Path, style: &DrawStyle, transform: Transform) {
    if let Some(fill) = style.fill.filter(|c| c.a > 0) {
        pixmap.fill_path(path, &paint_for(fill), FillRule::Winding, transform, None);
    }
    if let Some(stroke) = style.stroke.as_ref().filter(|s| s.color.a > 0) {
        pixmap.stroke_path(
            path,
            &paint_for(stroke.color),
            &skia_stroke(stroke),
            transform,
            None,
        );
    }
}

fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let c = pixels[(y * width + x) as usize].demultiply();
        image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
    })
}

/// Rasterises `text` into its own pixmap, top-left at the origin.
fn text_pixmap(text: &str, font_size: f32, color: Color) -> Option<Pixmap> {
    let font = font_manager::label_font()?;
    let scale = Scale::uniform(font_size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, rt_point(0.0, v_metrics.ascent))
        .collect();

    let width = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .map(|bb| bb.max.x)
        .max()?
        .max(1) as u32;
    let height = (v_metrics.ascent - v_metrics.descent).ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height)?;
    let stride = width as i32;

    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        let pixels = pixmap.pixels_mut();
        glyph.draw(|gx, gy, v| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px >= stride || py >= height as i32 {
                return;
            }
            let alpha = (v.clamp(0.0, 1.0) * color.a as f32) as u8;
            let idx = (py * stride + px) as usize;
            pixels[idx] = ColorU8::from_rgba(color.r, color.g, color.b, alpha).premultiply();
        });
    }

    Some(pixmap)
}

impl PngExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints the scene into a pixmap `pixel_ratio` times its size.
    pub fn render_pixmap(&self, scene: &Scene<'_>, pixel_ratio: f64) -> Result<Pixmap, ExportError> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(ExportError::InvalidPixelRatio { ratio: pixel_ratio });
        }

        let width = (scene.width as f64 * pixel_ratio).ceil() as u32;
        let height = (scene.height as f64 * pixel_ratio).ceil() as u32;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(ExportError::SurfaceAllocation { width, height })?;
        pixmap.fill(skia_color(self.clear_color));

        let ratio = pixel_ratio as f32;
        let base = Transform::from_scale(ratio, ratio);

        for drawable in &scene.drawables {
            self.paint_drawable(&mut pixmap, scene, drawable, base, ratio);
        }

        tracing::debug!(
            "Rendered {} drawables at {}x{}",
            scene.drawables.len(),
            width,
            height
        );
        Ok(pixmap)
    }

    fn paint_drawable(
        &self,
        pixmap: &mut Pixmap,
        scene: &Scene<'_>,
        drawable: &Drawable,
        base: Transform,
        ratio: f32,
    ) {
        let style = &drawable.style;
        match &drawable.primitive {
            Primitive::Image { .. } => {
                if let Some(bg) = scene.background.and_then(image_to_pixmap) {
                    pixmap.draw_pixmap(0, 0, bg.as_ref(), &PixmapPaint::default(), base, None);
                }
            }
            Primitive::Line { points, closed } => {
                if let Some(path) = polyline(points, *closed) {
                    paint_path(pixmap, &path, style, base);
                }
            }
            Primitive::Circle { center, radius } => {
                if let Some(path) =
                    PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32)
                {
                    paint_path(pixmap, &path, style, base);
                }
            }
            Primitive::Rect {
                x,
                y,
                width,
                height,
                rotation,
            } => {
                let Some(rect) = Rect::from_xywh(*x as f32, *y as f32, *width as f32, *height as f32)
                else {
                    return;
                };
                let path = PathBuilder::from_rect(rect);
                let transform =
                    base.pre_concat(Transform::from_rotate_at(*rotation as f32, *x as f32, *y as f32));
                paint_path(pixmap, &path, style, transform);
            }
            Primitive::Icon {
                x,
                y,
                scale_x,
                scale_y,
                rotation,
            } => {
                let Some(path) = skia_path(septic_path()) else {
                    return;
                };
                let transform = base
                    .pre_translate(*x as f32, *y as f32)
                    .pre_concat(Transform::from_rotate(*rotation as f32))
                    .pre_scale(*scale_x as f32, *scale_y as f32);
                paint_path(pixmap, &path, style, transform);
            }
            Primitive::Text {
                text,
                position,
                offset,
                rotation,
                font_size,
            } => {
                let color = style.fill.unwrap_or(Color::BLACK);
                let Some(glyphs) = text_pixmap(text, *font_size as f32 * ratio, color) else {
                    return;
                };
                let transform = base
                    .pre_translate(position.x as f32, position.y as f32)
                    .pre_concat(Transform::from_rotate(*rotation as f32))
                    .pre_translate(-offset.x as f32, -offset.y as f32)
                    .pre_scale(1.0 / ratio, 1.0 / ratio);
                pixmap.draw_pixmap(0, 0, glyphs.as_ref(), &PixmapPaint::default(), transform, None);
            }
        }
    }

    /// Paints the scene and returns it as an RGBA image.
    pub fn render_image(&self, scene: &Scene<'_>, pixel_ratio: f64) -> Result<RgbaImage, ExportError> {
        self.render_pixmap(scene, pixel_ratio)
            .map(|pixmap| pixmap_to_image(&pixmap))
    }
}

impl ExportAdapter for PngExporter {
    fn render_to_image(&self, scene: &Scene<'_>, pixel_ratio: f64) -> Result<Vec<u8>, ExportError> {
        let image = self.render_image(scene, pixel_ratio)?;
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ExportError::Encode {
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }
}
