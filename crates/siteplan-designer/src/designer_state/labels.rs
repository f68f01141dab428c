//! Measurement label editing for designer state.

use super::DesignerState;
use crate::labels::{commit_patch, label_for, labels_for, LabelField, MeasurementLabel};
use siteplan_core::DesignerError;

impl DesignerState {
    /// Labels currently shown for shape `id`.
    pub fn labels(&self, id: u64) -> Vec<MeasurementLabel> {
        self.canvas
            .get_shape(id)
            .map(|record| {
                labels_for(
                    record,
                    self.scale_factor(),
                    &self.scene_style.labels,
                )
            })
            .unwrap_or_default()
    }

    /// Displayed text of one label, if shown.
    pub fn label_text(&self, id: u64, field: LabelField) -> Option<String> {
        let record = self.canvas.get_shape(id)?;
        label_for(record, field, self.scale_factor(), &self.scene_style.labels)
            .map(|label| label.text)
    }

    /// Opens the inline editor on a label, seeded with its value.
    ///
    /// Any edit already open is committed first.
    pub fn begin_label_edit(&mut self, id: u64, field: LabelField) -> Result<(), DesignerError> {
        if self.calibration.is_active() {
            return Err(DesignerError::NotEditable {
                id,
                field: field.name().to_string(),
            });
        }

        let record = self
            .canvas
            .get_shape(id)
            .ok_or(DesignerError::UnknownShapeReference { id })?;
        let label = label_for(record, field, self.scale_factor(), &self.scene_style.labels)
            .ok_or_else(|| DesignerError::NotEditable {
                id,
                field: field.name().to_string(),
            })?;

        if self.label_editor.is_open() {
            if let Err(err) = self.commit_label_edit() {
                tracing::warn!("Previous label edit discarded: {}", err);
            }
        }

        tracing::debug!("Editing {} label of shape {}", field, id);
        self.label_editor.open(&label);
        Ok(())
    }

    /// Replaces the text in the open editor.
    pub fn set_label_input(&mut self, text: impl Into<String>) {
        self.label_editor.set_input(text);
    }

    /// Commits the open edit, converting the entered feet back to pixels.
    ///
    /// The editor always closes. Invalid text leaves the geometry as it
    /// was. Returns `Ok(false)` if no edit was open.
    pub fn commit_label_edit(&mut self) -> Result<bool, DesignerError> {
        let Some(edit) = self.label_editor.close() else {
            return Ok(false);
        };

        let record = self
            .canvas
            .get_shape(edit.shape_id)
            .ok_or(DesignerError::UnknownShapeReference { id: edit.shape_id })?;

        let patch = match commit_patch(record, edit.field, &edit.input, self.effective_scale()) {
            Ok(patch) => patch,
            Err(err) => {
                tracing::warn!("Rejected label edit on shape {}: {}", edit.shape_id, err);
                return Err(err);
            }
        };

        tracing::debug!(
            "Committed {} = '{}' on shape {}",
            edit.field,
            edit.input.trim(),
            edit.shape_id
        );
        self.canvas.update_shape(edit.shape_id, &patch)?;
        Ok(true)
    }

    /// Closes the editor without touching the shape.
    pub fn cancel_label_edit(&mut self) -> bool {
        self.label_editor.close().is_some()
    }
}
