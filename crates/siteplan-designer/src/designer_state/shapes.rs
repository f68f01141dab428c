//! Shape operations (place, update, delete) for designer state.

use super::DesignerState;
use crate::canvas::{PlacementTool, ShapeRecord};
use crate::geometry::Point;
use crate::model::{IconShape, RulerShape, Shape, ShapePatch, StructureShape};
use crate::prompt::OperatorPrompt;
use siteplan_core::units::feet_to_pixels;
use siteplan_core::DesignerError;

pub const STRUCTURE_LENGTH_PROMPT: &str = "Structure length (ft):";
pub const STRUCTURE_WIDTH_PROMPT: &str = "Structure width (ft):";

/// What to place and with which real-world parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Well,
    Septic,
    /// Footprint in feet, converted to pixels through the current scale.
    Structure { length_ft: f64, width_ft: f64 },
    Ruler,
}

fn positive_feet(value: f64, name: &str) -> Result<f64, DesignerError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DesignerError::InvalidPlacementInput {
            reason: format!("structure {} must be positive, got {}", name, value),
        })
    }
}

impl DesignerState {
    /// Places a new shape anchored at `anchor` and returns its id.
    ///
    /// Structures convert feet to pixels with the effective scale, which
    /// is one pixel per foot before any calibration. Icons use the
    /// configured pixel size regardless of scale, and rulers start
    /// horizontal with the configured length.
    pub fn place(&mut self, placement: Placement, anchor: Point) -> Result<u64, DesignerError> {
        if !anchor.is_finite() {
            return Err(DesignerError::InvalidPlacementInput {
                reason: "anchor is not finite".to_string(),
            });
        }

        let defaults = self.placement_defaults;
        let shape = match placement {
            Placement::Well => Shape::Well(IconShape::new(
                anchor,
                defaults.icon_size_px,
                defaults.well_scale,
            )),
            Placement::Septic => Shape::Septic(IconShape::new(
                anchor,
                defaults.icon_size_px,
                defaults.septic_scale,
            )),
            Placement::Structure {
                length_ft,
                width_ft,
            } => {
                let length_ft = positive_feet(length_ft, "length")?;
                let width_ft = positive_feet(width_ft, "width")?;
                let scale = self.effective_scale();
                if self.scale_factor().is_none() {
                    tracing::debug!("Placing structure before calibration, using 1 px/ft");
                }
                Shape::Structure(StructureShape::new(
                    anchor,
                    feet_to_pixels(width_ft, scale),
                    feet_to_pixels(length_ft, scale),
                ))
            }
            Placement::Ruler => Shape::Ruler(RulerShape::new(
                anchor,
                anchor.offset(defaults.ruler_offset_px, 0.0),
            )),
        };

        let kind = shape.kind();
        let id = self.canvas.add_shape(shape);
        tracing::info!(
            "Placed {} {} at ({:.1}, {:.1})",
            kind.name(),
            id,
            anchor.x,
            anchor.y
        );
        Ok(id)
    }

    /// Places the shape for `tool`, asking the operator for structure
    /// dimensions. A cancelled or invalid length skips the width question.
    pub(crate) fn place_with_tool(
        &mut self,
        tool: PlacementTool,
        anchor: Point,
        prompt: &mut dyn OperatorPrompt,
    ) -> Result<u64, DesignerError> {
        let placement = match tool {
            PlacementTool::Well => Placement::Well,
            PlacementTool::Septic => Placement::Septic,
            PlacementTool::Ruler => Placement::Ruler,
            PlacementTool::Structure => {
                let length_ft = prompt
                    .ask_number(STRUCTURE_LENGTH_PROMPT)
                    .ok_or_else(|| DesignerError::InvalidPlacementInput {
                        reason: "no structure length entered".to_string(),
                    })
                    .and_then(|v| positive_feet(v, "length"))?;
                let width_ft = prompt
                    .ask_number(STRUCTURE_WIDTH_PROMPT)
                    .ok_or_else(|| DesignerError::InvalidPlacementInput {
                        reason: "no structure width entered".to_string(),
                    })?;
                Placement::Structure {
                    length_ft,
                    width_ft,
                }
            }
        };
        self.place(placement, anchor)
    }

    pub fn shape(&self, id: u64) -> Option<&ShapeRecord> {
        self.canvas.get_shape(id)
    }

    /// Merges `patch` into shape `id`.
    ///
    /// Unknown ids are a logged no-op. Returns whether a shape was updated.
    pub fn update_shape(&mut self, id: u64, patch: ShapePatch) -> bool {
        match self.canvas.update_shape(id, &patch) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Ignoring update: {}", err);
                false
            }
        }
    }

    /// Deletes shape `id`, clearing any selection, edit or drag that
    /// referred to it. Unknown ids are a logged no-op.
    pub fn delete_shape(&mut self, id: u64) -> bool {
        let Some(record) = self.canvas.remove_shape(id) else {
            tracing::warn!(
                "Ignoring delete: {}",
                DesignerError::UnknownShapeReference { id }
            );
            return false;
        };

        if self
            .label_editor
            .active()
            .is_some_and(|edit| edit.shape_id == id)
        {
            self.label_editor.close();
        }
        if self.drag.as_ref().is_some_and(|d| d.shape_id == id) {
            self.drag = None;
        }
        if self.context_menu.as_ref().is_some_and(|m| m.target_id == id) {
            self.context_menu = None;
        }

        tracing::info!("Deleted {} {}", record.kind().name(), id);
        true
    }

    /// Resolves a hit node id to the shape that owns it.
    pub fn find_containing_shape(&self, node_id: &str) -> Option<u64> {
        self.canvas.find_containing_shape(node_id)
    }
}
