//! Canvas holding the placed shapes, the selection and the background.

mod types;

pub use types::{PlacementTool, ShapeRecord};

use crate::model::{ShapePatch, Shape};
use crate::selection_manager::SelectionManager;
use crate::shape_store::ShapeStore;
use image::RgbaImage;
use siteplan_core::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use siteplan_core::DesignerError;

/// Canvas state managing shapes and the drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub shape_store: ShapeStore,
    pub selection_manager: SelectionManager,
    width: u32,
    height: u32,
    background: Option<RgbaImage>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Creates a new canvas with the default surface size.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT)
    }

    /// Creates a canvas with specified dimensions.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            shape_store: ShapeStore::new(),
            selection_manager: SelectionManager::new(),
            width,
            height,
            background: None,
        }
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn background(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }

    /// Replaces the background image and resizes the surface to match.
    ///
    /// Shapes keep their pixel coordinates.
    pub fn set_background(&mut self, image: RgbaImage) {
        self.width = image.width();
        self.height = image.height();
        self.background = Some(image);
    }

    /// Returns the number of shapes on the canvas.
    pub fn shape_count(&self) -> usize {
        self.shape_store.len()
    }

    /// Gets a reference to a shape by ID.
    pub fn get_shape(&self, id: u64) -> Option<&ShapeRecord> {
        self.shape_store.get(id)
    }

    /// Iterates shapes in paint order.
    pub fn shapes(&self) -> impl DoubleEndedIterator<Item = &ShapeRecord> + '_ {
        self.shape_store.iter()
    }

    /// Adds a shape and returns its new id.
    pub fn add_shape(&mut self, shape: Shape) -> u64 {
        let id = self.shape_store.generate_id();
        self.shape_store.insert(ShapeRecord::new(id, shape));
        id
    }

    /// Merges a partial update into a shape.
    pub fn update_shape(&mut self, id: u64, patch: &ShapePatch) -> Result<(), DesignerError> {
        self.shape_store.update(id, patch)
    }

    /// Removes a shape, clearing the selection if it pointed at it.
    pub fn remove_shape(&mut self, id: u64) -> Option<ShapeRecord> {
        let removed = self.shape_store.remove(id)?;
        self.selection_manager.on_removed(id);
        Some(removed)
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selection_manager.selected_id()
    }

    /// Selects `id`, or clears the selection for `None` or an unknown id.
    pub fn select(&mut self, id: Option<u64>) -> Option<u64> {
        self.selection_manager.select(&self.shape_store, id)
    }

    pub fn deselect_all(&mut self) {
        self.selection_manager.deselect_all();
    }

    /// Resolves a rendered node id to its owning shape.
    pub fn find_containing_shape(&self, node_id: &str) -> Option<u64> {
        self.shape_store.find_containing_shape(node_id)
    }

    /// Removes every shape and clears the selection.
    pub fn clear(&mut self) {
        self.shape_store.clear();
        self.selection_manager.deselect_all();
    }
}
