//! Background image and raster export for designer state.

use super::DesignerState;
use crate::renderer::{ExportAdapter, PngExporter};
use crate::scene::{build_scene, Scene};
use anyhow::Context;
use image::RgbaImage;
use std::path::Path;

impl DesignerState {
    /// Replaces the background image and resizes the surface to it.
    ///
    /// Existing shapes keep their pixel coordinates.
    pub fn set_background(&mut self, image: RgbaImage) {
        tracing::info!("Background set to {}x{}", image.width(), image.height());
        self.canvas.set_background(image);
    }

    /// Decodes an encoded image (PNG, JPEG, ...) and sets it as background.
    pub fn load_background(&mut self, bytes: &[u8]) -> siteplan_core::Result<()> {
        let image = image::load_from_memory(bytes).map_err(|e| {
            tracing::warn!("Failed to decode background image: {}", e);
            siteplan_core::Error::other(format!("Failed to decode background image: {}", e))
        })?;
        self.set_background(image.to_rgba8());
        Ok(())
    }

    /// Drawable primitives for the current state.
    pub fn scene(&self) -> Scene<'_> {
        build_scene(self)
    }

    /// Renders the current state to PNG bytes with the default exporter.
    pub fn export_png(&self, pixel_ratio: f64) -> siteplan_core::Result<Vec<u8>> {
        self.export_with(&PngExporter::default(), pixel_ratio)
    }

    /// Renders the current state through `adapter`.
    pub fn export_with(
        &self,
        adapter: &dyn ExportAdapter,
        pixel_ratio: f64,
    ) -> siteplan_core::Result<Vec<u8>> {
        let scene = self.scene();
        let bytes = adapter.render_to_image(&scene, pixel_ratio)?;
        tracing::info!(
            "Exported {} shapes at pixel ratio {} ({} bytes)",
            self.canvas.shape_count(),
            pixel_ratio,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Renders the current state to a PNG file.
    pub fn export_to_file(&self, path: impl AsRef<Path>, pixel_ratio: f64) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = self
            .export_png(pixel_ratio)
            .context("Failed to render site plan")?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
