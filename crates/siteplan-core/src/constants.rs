//! Default values used when no configuration has been loaded.

/// Edge length of a freshly placed well or septic icon, in pixels.
pub const DEFAULT_ICON_SIZE_PX: f64 = 80.0;

/// Horizontal distance from a new ruler's anchor to its far endpoint.
pub const DEFAULT_RULER_OFFSET_PX: f64 = 100.0;

/// Visual scale applied to a freshly placed septic icon.
pub const DEFAULT_SEPTIC_SCALE: f64 = 0.5;

/// Smallest box edge a transform handle may leave behind.
pub const MIN_TRANSFORM_BOX_PX: f64 = 20.0;

/// Measurement label font size.
pub const LABEL_FONT_SIZE: f64 = 14.0;

/// Distance between a ruler and its label, along the segment normal.
pub const RULER_LABEL_PADDING_PX: f64 = 14.0;

/// Distance between a structure edge and its label.
pub const STRUCTURE_LABEL_OFFSET_PX: f64 = 20.0;

/// Drawing surface size before a background image is loaded.
pub const DEFAULT_SURFACE_WIDTH: u32 = 800;
pub const DEFAULT_SURFACE_HEIGHT: u32 = 600;

/// Export pixel ratio.
pub const DEFAULT_PIXEL_RATIO: f64 = 2.0;

/// File name suggested for exported rasters.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "site_plan.png";

/// Scale used for conversions before the first calibration.
pub const UNCALIBRATED_SCALE: f64 = 1.0;

/// Calibration marker radius.
pub const CALIBRATION_POINT_RADIUS: f64 = 5.0;

/// Ruler endpoint handle radius.
pub const RULER_HANDLE_RADIUS: f64 = 6.0;

/// Width of the invisible hit area along a ruler.
pub const RULER_HITBOX_WIDTH: f64 = 20.0;
