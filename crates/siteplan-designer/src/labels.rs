//! Measurement labels.
//!
//! Labels are derived from the shape geometry and the current scale factor
//! on every call and are never stored on the shape, so a new calibration
//! relabels everything without touching a record.

use crate::canvas::ShapeRecord;
use crate::geometry::{rotate_point, Point};
use crate::model::{Shape, ShapePatch};
use siteplan_core::constants::{RULER_LABEL_PADDING_PX, STRUCTURE_LABEL_OFFSET_PX};
use siteplan_core::units::{feet_to_pixels, pixels_to_feet, round_tenth};
use siteplan_core::{format_feet, parse_feet, DesignerError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelField {
    Width,
    Length,
}

impl LabelField {
    pub fn name(&self) -> &'static str {
        match self {
            LabelField::Width => "width",
            LabelField::Length => "length",
        }
    }

    fn node_suffix(&self) -> &'static str {
        match self {
            LabelField::Width => "_label_width",
            LabelField::Length => "_label_length",
        }
    }

    /// Recognises a label node id such as `"4_label_width"`.
    pub fn from_node_id(node_id: &str) -> Option<LabelField> {
        [LabelField::Width, LabelField::Length]
            .into_iter()
            .find(|field| node_id.ends_with(field.node_suffix()))
    }
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Node id of the label for `field` on shape `shape_id`.
pub fn label_node_id(shape_id: u64, field: LabelField) -> String {
    format!("{}{}", shape_id, field.node_suffix())
}

/// Where labels sit relative to their shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// Gap between a structure edge and its label.
    pub structure_offset_px: f64,
    /// Gap between a ruler and its label, along the segment normal.
    pub ruler_padding_px: f64,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            structure_offset_px: STRUCTURE_LABEL_OFFSET_PX,
            ruler_padding_px: RULER_LABEL_PADDING_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementLabel {
    pub shape_id: u64,
    pub field: LabelField,
    /// Displayed value in feet, rounded to one decimal.
    pub value_ft: f64,
    pub text: String,
    pub position: Point,
    /// Text rotation in degrees.
    pub rotation: f64,
}

impl MeasurementLabel {
    pub fn node_id(&self) -> String {
        label_node_id(self.shape_id, self.field)
    }
}

/// `pixels / scale`, rounded to one decimal.
pub fn display_value(pixels: f64, scale: f64) -> f64 {
    round_tenth(pixels_to_feet(pixels, scale))
}

/// All labels for one record.
///
/// Structures are labelled only once a scale exists. Rulers are always
/// labelled, falling back to one pixel per foot before calibration. Icons
/// carry no labels.
pub fn labels_for(
    record: &ShapeRecord,
    scale_factor: Option<f64>,
    layout: &LabelLayout,
) -> Vec<MeasurementLabel> {
    [LabelField::Width, LabelField::Length]
        .into_iter()
        .filter_map(|field| label_for(record, field, scale_factor, layout))
        .collect()
}

/// The label for `field` on `record`, if that label is shown.
pub fn label_for(
    record: &ShapeRecord,
    field: LabelField,
    scale_factor: Option<f64>,
    layout: &LabelLayout,
) -> Option<MeasurementLabel> {
    match (&record.shape, field) {
        (Shape::Structure(s), _) => {
            let scale = scale_factor?;
            let anchor = Point::new(s.x, s.y);
            let (pixels, local, rotation, suffix) = match field {
                LabelField::Width => (
                    s.width,
                    Point::new(s.x, s.y - layout.structure_offset_px),
                    s.rotation,
                    "W",
                ),
                LabelField::Length => (
                    s.length,
                    Point::new(s.x + s.width + layout.structure_offset_px, s.y),
                    s.rotation + 90.0,
                    "L",
                ),
            };
            let value_ft = display_value(pixels, scale);
            Some(MeasurementLabel {
                shape_id: record.id,
                field,
                value_ft,
                text: format!("{} {}", format_feet(pixels_to_feet(pixels, scale)), suffix),
                position: rotate_point(local, s.rotation, anchor),
                rotation,
            })
        }
        (Shape::Ruler(r), LabelField::Length) => {
            let scale = scale_factor.unwrap_or(siteplan_core::constants::UNCALIBRATED_SCALE);
            let theta = r.direction_radians();
            let mid = r.midpoint();
            let pad = layout.ruler_padding_px;
            Some(MeasurementLabel {
                shape_id: record.id,
                field,
                value_ft: display_value(r.length(), scale),
                text: format_feet(pixels_to_feet(r.length(), scale)),
                position: mid.offset(pad * theta.sin(), -pad * theta.cos()),
                rotation: r.label_angle_degrees(),
            })
        }
        _ => None,
    }
}

/// Converts an entered label value back into a geometry patch.
///
/// Structures take the new pixel width or length directly. Rulers keep
/// their start point and direction and move the far endpoint so the
/// segment has the new length.
pub fn commit_patch(
    record: &ShapeRecord,
    field: LabelField,
    input: &str,
    scale: f64,
) -> Result<ShapePatch, DesignerError> {
    let value_ft = parse_feet(input)
        .filter(|v| *v >= 0.0)
        .ok_or_else(|| DesignerError::InvalidLabelInput {
            input: input.to_string(),
        })?;
    let pixels = feet_to_pixels(value_ft, scale);

    match (&record.shape, field) {
        (Shape::Structure(_), LabelField::Width) => Ok(ShapePatch::new().with_width(pixels)),
        (Shape::Structure(_), LabelField::Length) => Ok(ShapePatch::new().with_length(pixels)),
        (Shape::Ruler(r), LabelField::Length) => {
            let end = r.end_for_length(pixels);
            Ok(ShapePatch::end(end.x, end.y))
        }
        _ => Err(DesignerError::NotEditable {
            id: record.id,
            field: field.name().to_string(),
        }),
    }
}

/// A label whose text is being edited inline.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEdit {
    pub shape_id: u64,
    pub field: LabelField,
    pub input: String,
    /// Where the host should draw the text input.
    pub anchor: Point,
}

/// Inline editor state. At most one label is edited at a time.
#[derive(Debug, Clone, Default)]
pub struct LabelEditor {
    active: Option<LabelEdit>,
}

impl LabelEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the editor on `label`, seeded with its displayed value.
    pub fn open(&mut self, label: &MeasurementLabel) {
        self.active = Some(LabelEdit {
            shape_id: label.shape_id,
            field: label.field,
            input: format!("{:.1}", label.value_ft),
            anchor: label.position,
        });
    }

    pub fn active(&self) -> Option<&LabelEdit> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_editing(&self, shape_id: u64, field: LabelField) -> bool {
        self.active
            .as_ref()
            .is_some_and(|e| e.shape_id == shape_id && e.field == field)
    }

    /// Replaces the pending text. Ignored when no edit is open.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.active.as_mut() {
            edit.input = text.into();
        }
    }

    /// Closes the editor, returning the edit that was open.
    pub fn close(&mut self) -> Option<LabelEdit> {
        self.active.take()
    }
}
