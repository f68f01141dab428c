//! Designer state manager for UI integration.
//! Owns the canvas, the calibration and the modal interaction state, and
//! routes pointer and keyboard events from the rendering surface.
//!
//! This module is split into submodules for better organization:
//! - `shapes`: Placement, update and deletion of shapes
//! - `labels`: Measurement label editing
//! - `interaction`: Pointer/keyboard routing, drags and transforms
//! - `export`: Background image and raster export

mod export;
mod interaction;
mod labels;
mod shapes;

pub use interaction::{
    ContextMenu, DragHandle, HitTarget, Key, PointerButton, PointerEvent, TransformResult,
};
pub use shapes::Placement;

use crate::calibration::ScaleCalibration;
use crate::canvas::{Canvas, PlacementTool};
use crate::labels::LabelEditor;
use crate::scene::SceneStyle;
use siteplan_core::constants::{
    DEFAULT_ICON_SIZE_PX, DEFAULT_RULER_OFFSET_PX, DEFAULT_SEPTIC_SCALE, MIN_TRANSFORM_BOX_PX,
};

/// Defaults applied when new shapes are placed or transformed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementDefaults {
    pub icon_size_px: f64,
    pub ruler_offset_px: f64,
    pub septic_scale: f64,
    pub well_scale: f64,
    pub min_transform_box_px: f64,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            icon_size_px: DEFAULT_ICON_SIZE_PX,
            ruler_offset_px: DEFAULT_RULER_OFFSET_PX,
            septic_scale: DEFAULT_SEPTIC_SCALE,
            well_scale: 1.0,
            min_transform_box_px: MIN_TRANSFORM_BOX_PX,
        }
    }
}

/// Designer state for UI integration
#[derive(Clone, Debug, Default)]
pub struct DesignerState {
    pub canvas: Canvas,
    pub calibration: ScaleCalibration,
    pub label_editor: LabelEditor,
    pub placement_defaults: PlacementDefaults,
    pub scene_style: SceneStyle,
    pub(crate) armed_tool: Option<PlacementTool>,
    pub(crate) context_menu: Option<ContextMenu>,
    pub(crate) drag: Option<interaction::DragState>,
}

impl DesignerState {
    /// Creates a new designer state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a designer state with custom defaults.
    pub fn with_defaults(placement_defaults: PlacementDefaults, scene_style: SceneStyle) -> Self {
        Self {
            placement_defaults,
            scene_style,
            ..Self::default()
        }
    }

    /// Arms a placement tool; the next background click places it.
    ///
    /// An active calibration still takes every click until it finishes.
    pub fn arm_tool(&mut self, tool: PlacementTool) {
        tracing::debug!("Armed tool {:?}", tool);
        self.armed_tool = Some(tool);
    }

    pub fn armed_tool(&self) -> Option<PlacementTool> {
        self.armed_tool
    }

    pub fn disarm_tool(&mut self) {
        self.armed_tool = None;
    }

    /// Enters calibration mode.
    ///
    /// Any label edit, armed tool, selection or context menu is dropped so
    /// calibration is the only active mode.
    pub fn begin_calibration(&mut self) {
        self.label_editor.close();
        self.armed_tool = None;
        self.context_menu = None;
        self.drag = None;
        self.canvas.deselect_all();
        self.calibration.begin();
    }

    pub fn cancel_calibration(&mut self) {
        self.calibration.cancel();
    }

    /// Pixels per foot once calibrated.
    pub fn scale_factor(&self) -> Option<f64> {
        self.calibration.scale_factor()
    }

    /// Scale used for conversions, `1.0` before calibration.
    pub fn effective_scale(&self) -> f64 {
        self.calibration.effective_scale()
    }

    /// Status line text such as `Scale: 10.00 px/ft`.
    pub fn scale_readout(&self) -> Option<String> {
        self.calibration.readout()
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.canvas.selected_id()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }
}
