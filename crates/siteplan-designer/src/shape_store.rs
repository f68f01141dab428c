//! Authoritative storage for placed shapes.

use crate::canvas::ShapeRecord;
use crate::model::{AnnotationShape, ShapePatch};
use siteplan_core::DesignerError;
use std::collections::HashMap;

/// Owns every shape record, keyed by id, plus the paint order.
///
/// Ids come from a monotonic counter and are never handed out twice, even
/// after the shape that held one is removed.
#[derive(Debug, Clone)]
pub struct ShapeStore {
    shapes: HashMap<u64, ShapeRecord>,
    draw_order: Vec<u64>,
    next_id: u64,
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeStore {
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            draw_order: Vec::new(),
            next_id: 1,
        }
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Inserts a record, appending it to the top of the paint order.
    pub fn insert(&mut self, record: ShapeRecord) {
        let id = record.id;
        if id >= self.next_id {
            self.next_id = id + 1;
        }
        if self.shapes.insert(id, record).is_none() {
            self.draw_order.push(id);
        }
    }

    pub fn get(&self, id: u64) -> Option<&ShapeRecord> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Merges `patch` into the record with `id`.
    ///
    /// Non-finite values are dropped from the patch and negative
    /// dimensions are clamped to zero before anything is written.
    pub fn update(&mut self, id: u64, patch: &ShapePatch) -> Result<(), DesignerError> {
        let record = self
            .shapes
            .get_mut(&id)
            .ok_or(DesignerError::UnknownShapeReference { id })?;

        let (clean, dropped) = patch.sanitized();
        if dropped {
            tracing::warn!("Dropped non-finite attributes updating shape {}", id);
        }
        record.shape.apply_patch(&clean);
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Option<ShapeRecord> {
        let removed = self.shapes.remove(&id)?;
        self.draw_order.retain(|&x| x != id);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.draw_order.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates records in paint order, bottom first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ShapeRecord> + '_ {
        self.draw_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Resolves a rendered node id to the shape that owns it.
    ///
    /// Node ids are the shape id, optionally followed by `_`-separated
    /// suffixes for sub-parts (`"7_start"`, `"7_label_width"`). Suffixes
    /// are stripped one at a time until a known id remains.
    pub fn find_containing_shape(&self, node_id: &str) -> Option<u64> {
        let mut candidate = node_id;
        loop {
            if let Ok(id) = candidate.parse::<u64>() {
                if self.contains(id) {
                    return Some(id);
                }
            }
            let (parent, _) = candidate.rsplit_once('_')?;
            candidate = parent;
        }
    }
}
