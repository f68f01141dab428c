//! # Site Plan Designer
//!
//! This crate turns pointer interactions on an uploaded site image into
//! scaled real-world measurements. It combines scale calibration, a shape
//! store, measurement labels and an interaction router into a single
//! state object driven by the host's rendering surface.
//!
//! ## Core Components
//!
//! ### Annotation Model
//! - **Shapes**: Wells, septic fields, structures and rulers
//! - **Shape Store**: Authoritative id to shape mapping with draw order
//! - **Selection**: At most one selected shape
//! - **Canvas**: Shapes, selection, background image and surface size
//!
//! ### Measurement
//! - **Calibration**: Two-click pixel to feet ratio
//! - **Labels**: Feet readouts derived on every render, editable inline
//!
//! ### Rendering Boundary
//! - **Scene**: Drawable primitives with node ids for hit reporting
//! - **Renderer**: PNG export through tiny-skia
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (Event routing)
//!   ├── Canvas
//!   │     ├── ShapeStore
//!   │     └── SelectionManager
//!   ├── ScaleCalibration
//!   └── LabelEditor
//!
//! Scene (Read view per render pass)
//!   └── Renderer (Raster export)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use siteplan_designer::{DesignerState, Placement, Point};
//!
//! let mut state = DesignerState::new();
//! state.calibration.calibrate(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0)?;
//! let id = state.place(
//!     Placement::Structure { length_ft: 5.0, width_ft: 3.0 },
//!     Point::new(50.0, 50.0),
//! )?;
//! let png = state.export_png(2.0)?;
//! ```

pub mod calibration;
pub mod canvas;
pub mod font_manager;
pub mod geometry;
pub mod icon_path;
pub mod labels;
pub mod model;
pub mod prompt;
pub mod renderer;
pub mod scene;
pub mod selection_manager;
pub mod shape_store;

// State and integration
pub mod designer_state;

pub use calibration::{CalibrationPhase, CalibrationStep, ScaleCalibration};
pub use canvas::{Canvas, PlacementTool, ShapeRecord};
pub use geometry::{line_angle_degrees, line_length, rotate_point, Point};
pub use labels::{LabelEditor, LabelField, LabelLayout, MeasurementLabel};
pub use model::{
    AnnotationShape, IconShape, RulerShape, Shape, ShapeKind, ShapePatch, StructureShape,
};
pub use prompt::{NoPrompt, OperatorPrompt};
pub use renderer::{ExportAdapter, PngExporter};
pub use scene::{build_scene, Color, DrawStyle, Drawable, Primitive, Scene, SceneStyle};
pub use selection_manager::SelectionManager;
pub use shape_store::ShapeStore;

pub use designer_state::{
    ContextMenu, DesignerState, DragHandle, HitTarget, Key, Placement, PlacementDefaults,
    PointerButton, PointerEvent, TransformResult,
};
