//! Pointer and keyboard routing for designer state.
//!
//! Every primary pointer-down is dispatched in a fixed priority order:
//! calibration, placement on the background, transform overlay, then
//! selection. Drags continue on pointer-move until pointer-up.

use super::DesignerState;
use crate::geometry::Point;
use crate::icon_path::septic_bounds;
use crate::labels::LabelField;
use crate::model::{AnnotationShape, Shape, ShapePatch};
use crate::prompt::OperatorPrompt;
use crate::scene::TRANSFORMER_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// What the rendering surface found under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty surface or the background image.
    Background,
    /// A listening primitive with this node id.
    Node(String),
}

impl HitTarget {
    pub fn node(id: impl Into<String>) -> Self {
        HitTarget::Node(id.into())
    }

    fn is_transformer(&self) -> bool {
        matches!(self, HitTarget::Node(id) if id.starts_with(TRANSFORMER_PREFIX))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
    pub target: HitTarget,
}

impl PointerEvent {
    pub fn primary(position: Point, target: HitTarget) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            target,
        }
    }

    pub fn secondary(position: Point, target: HitTarget) -> Self {
        Self {
            position,
            button: PointerButton::Secondary,
            target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

/// Delete confirmation shown at the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub position: Point,
    pub target_id: u64,
}

/// Which part of a shape a drag holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHandle {
    /// Point-anchored body (well, septic, structure).
    Body,
    /// The whole ruler, moved by its midpoint.
    RulerBody,
    RulerStart,
    RulerEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    pub(crate) shape_id: u64,
    handle: DragHandle,
    /// Pointer position when the drag began.
    origin: Point,
    /// Shape anchor when the drag began.
    anchor: Point,
}

/// Final attributes read back from the transform overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformResult {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl DesignerState {
    /// Routes a pointer-down from the rendering surface.
    pub fn pointer_down(&mut self, event: &PointerEvent, prompt: &mut dyn OperatorPrompt) {
        match event.button {
            PointerButton::Primary => self.primary_down(event, prompt),
            PointerButton::Secondary => self.secondary_down(event),
        }
    }

    fn primary_down(&mut self, event: &PointerEvent, prompt: &mut dyn OperatorPrompt) {
        // Clicking anywhere blurs the inline editor
        if self.label_editor.is_open() {
            if let Err(err) = self.commit_label_edit() {
                tracing::debug!("Label edit closed without change: {}", err);
            }
        }
        self.context_menu = None;

        if self.calibration.is_active() {
            if let Err(err) = self.calibration.record_click(event.position, prompt) {
                tracing::debug!("Calibration aborted: {}", err);
            }
            return;
        }

        if let (Some(tool), HitTarget::Background) = (self.armed_tool, &event.target) {
            self.armed_tool = None;
            if let Err(err) = self.place_with_tool(tool, event.position, prompt) {
                tracing::warn!("Placement aborted: {}", err);
            }
            return;
        }

        if event.target.is_transformer() {
            tracing::debug!("Pointer-down on transform overlay, leaving to overlay");
            return;
        }

        let node_id = match &event.target {
            HitTarget::Node(id) => id.as_str(),
            HitTarget::Background => {
                self.canvas.deselect_all();
                return;
            }
        };

        let owner = self.find_containing_shape(node_id);
        let Some(id) = self.canvas.select(owner) else {
            tracing::debug!("No shape owns node '{}'", node_id);
            return;
        };

        if let Some(field) = LabelField::from_node_id(node_id) {
            if let Err(err) = self.begin_label_edit(id, field) {
                tracing::debug!("Label not editable: {}", err);
            }
            return;
        }

        self.begin_drag(id, node_id, event.position);
    }

    fn secondary_down(&mut self, event: &PointerEvent) {
        let target = match &event.target {
            HitTarget::Node(node_id) if !event.target.is_transformer() => {
                self.find_containing_shape(node_id)
            }
            _ => None,
        };
        self.context_menu = target.map(|target_id| ContextMenu {
            position: event.position,
            target_id,
        });
    }

    fn begin_drag(&mut self, id: u64, node_id: &str, position: Point) {
        let Some(record) = self.canvas.get_shape(id) else {
            return;
        };
        let handle = match &record.shape {
            Shape::Ruler(_) => match node_id.strip_prefix(&id.to_string()) {
                Some("_start") => DragHandle::RulerStart,
                Some("_end") => DragHandle::RulerEnd,
                _ => DragHandle::RulerBody,
            },
            _ => DragHandle::Body,
        };
        self.drag = Some(DragState {
            shape_id: id,
            handle,
            origin: position,
            anchor: record.shape.anchor(),
        });
        tracing::debug!("Drag {:?} on shape {}", handle, id);
    }

    /// Handle held by the current drag, if any.
    pub fn drag_handle(&self) -> Option<DragHandle> {
        self.drag.map(|d| d.handle)
    }

    /// Routes pointer movement: calibration preview or the active drag.
    pub fn pointer_move(&mut self, position: Point) {
        if self.calibration.is_active() {
            self.calibration.update_hover(position);
            return;
        }

        let Some(drag) = self.drag else {
            return;
        };

        let patch = match drag.handle {
            DragHandle::Body => ShapePatch::position(
                drag.anchor.x + position.x - drag.origin.x,
                drag.anchor.y + position.y - drag.origin.y,
            ),
            DragHandle::RulerBody => {
                let Some(ruler) = self
                    .canvas
                    .get_shape(drag.shape_id)
                    .and_then(|r| r.shape.as_ruler())
                else {
                    self.drag = None;
                    return;
                };
                let mid = ruler.midpoint();
                let dx = position.x - mid.x;
                let dy = position.y - mid.y;
                ShapePatch::position(ruler.x + dx, ruler.y + dy)
                    .with_end(ruler.x2 + dx, ruler.y2 + dy)
            }
            DragHandle::RulerStart => ShapePatch::position(position.x, position.y),
            DragHandle::RulerEnd => ShapePatch::end(position.x, position.y),
        };

        if !self.update_shape(drag.shape_id, patch) {
            self.drag = None;
        }
    }

    /// Ends the active drag.
    pub fn pointer_up(&mut self, position: Point) {
        if let Some(drag) = self.drag.take() {
            tracing::debug!(
                "Drag on shape {} ended at ({:.1}, {:.1})",
                drag.shape_id,
                position.x,
                position.y
            );
        }
    }

    /// Applies the final state of a resize/rotate gesture.
    ///
    /// Structures bake the scale into `width`/`length`. Septic icons keep
    /// the scale as a visual attribute. A result smaller than the minimum
    /// box on either axis is discarded, as are results for shapes without
    /// a transform overlay. Returns whether the shape changed.
    pub fn end_transform(&mut self, id: u64, result: TransformResult) -> bool {
        let Some(record) = self.canvas.get_shape(id) else {
            tracing::warn!("Transform ended on unknown shape {}", id);
            return false;
        };
        let min_box = self.placement_defaults.min_transform_box_px;

        let (box_w, box_h, patch) = match &record.shape {
            Shape::Structure(s) => {
                let width = (s.width * result.scale_x).abs();
                let length = (s.length * result.scale_y).abs();
                (
                    width,
                    length,
                    ShapePatch::position(result.x, result.y)
                        .with_rotation(result.rotation)
                        .with_width(width)
                        .with_length(length),
                )
            }
            Shape::Septic(_) => {
                let glyph = septic_bounds();
                (
                    (glyph.width() as f64 * result.scale_x).abs(),
                    (glyph.height() as f64 * result.scale_y).abs(),
                    ShapePatch::position(result.x, result.y)
                        .with_rotation(result.rotation)
                        .with_scale(result.scale_x, result.scale_y),
                )
            }
            other => {
                tracing::debug!("{} shapes have no transform overlay", other.kind().name());
                return false;
            }
        };

        if box_w < min_box || box_h < min_box {
            tracing::debug!(
                "Discarding transform on shape {}: {:.1}x{:.1} below {:.1}",
                id,
                box_w,
                box_h,
                min_box
            );
            return false;
        }

        self.update_shape(id, patch)
    }

    /// Handles a key press. Returns whether the key did anything.
    ///
    /// Enter commits the label edit. Escape cancels the innermost mode:
    /// label edit, then calibration, then the armed tool, then the
    /// context menu.
    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Enter => match self.commit_label_edit() {
                Ok(committed) => committed,
                Err(err) => {
                    tracing::debug!("Label edit closed without change: {}", err);
                    true
                }
            },
            Key::Escape => {
                if self.cancel_label_edit() {
                    true
                } else if self.calibration.is_active() {
                    self.calibration.cancel();
                    true
                } else if self.armed_tool.take().is_some() {
                    true
                } else {
                    self.context_menu.take().is_some()
                }
            }
        }
    }

    /// Deletes the context menu's target and closes the menu.
    pub fn confirm_context_delete(&mut self) -> bool {
        match self.context_menu.take() {
            Some(menu) => self.delete_shape(menu.target_id),
            None => false,
        }
    }

    pub fn dismiss_context_menu(&mut self) {
        self.context_menu = None;
    }
}
