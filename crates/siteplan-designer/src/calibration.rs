//! Two-click scale calibration.
//!
//! The operator clicks two points on the background whose real-world
//! separation is known, then types that separation in feet. The ratio of
//! pixel distance to feet becomes the scale factor used by every
//! measurement label.

use crate::geometry::{line_length, Point};
use crate::prompt::OperatorPrompt;
use siteplan_core::DesignerError;

pub const CALIBRATION_PROMPT: &str = "Enter real-world distance (feet):";
pub const INVALID_DISTANCE_MESSAGE: &str = "Invalid distance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalibrationPhase {
    #[default]
    Idle,
    AwaitingFirstPoint,
    AwaitingSecondPoint,
}

/// Result of feeding a click to an active calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStep {
    /// The first point was recorded; waiting for the second.
    PointRecorded,
    /// Calibration finished with this pixels-per-foot ratio.
    Calibrated(f64),
}

/// Calibration state machine plus the process-wide scale factor.
#[derive(Debug, Clone, Default)]
pub struct ScaleCalibration {
    phase: CalibrationPhase,
    points: Vec<Point>,
    hover: Option<Point>,
    scale_factor: Option<f64>,
}

impl ScaleCalibration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh calibration, discarding any in-flight points.
    ///
    /// The current scale factor is kept until a new one is derived.
    pub fn begin(&mut self) {
        self.points.clear();
        self.hover = None;
        self.phase = CalibrationPhase::AwaitingFirstPoint;
        tracing::debug!("Scale calibration started");
    }

    /// Abandons the calibration in progress, keeping the current scale.
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!("Scale calibration cancelled");
        }
        self.reset_points();
    }

    fn reset_points(&mut self) {
        self.points.clear();
        self.hover = None;
        self.phase = CalibrationPhase::Idle;
    }

    pub fn is_active(&self) -> bool {
        self.phase != CalibrationPhase::Idle
    }

    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn hover(&self) -> Option<Point> {
        self.hover
    }

    /// Pixels per foot, once calibrated.
    pub fn scale_factor(&self) -> Option<f64> {
        self.scale_factor
    }

    /// Scale used for conversions; `1.0` until the first calibration.
    pub fn effective_scale(&self) -> f64 {
        self.scale_factor
            .unwrap_or(siteplan_core::constants::UNCALIBRATED_SCALE)
    }

    pub fn is_calibrated(&self) -> bool {
        self.scale_factor.is_some()
    }

    /// Tracks the pointer for the preview segment.
    pub fn update_hover(&mut self, position: Point) {
        if self.phase == CalibrationPhase::AwaitingSecondPoint {
            self.hover = Some(position);
        }
    }

    /// Segment from the first point to the pointer while waiting for the
    /// second click.
    pub fn preview_segment(&self) -> Option<(Point, Point)> {
        match (self.points.as_slice(), self.hover) {
            ([first], Some(hover)) => Some((*first, hover)),
            _ => None,
        }
    }

    /// Feeds one click to the state machine.
    ///
    /// On the second click the operator is asked for the real-world
    /// distance. Rejected input aborts the calibration, notifies the
    /// operator, and leaves any earlier scale factor in place.
    pub fn record_click(
        &mut self,
        position: Point,
        prompt: &mut dyn OperatorPrompt,
    ) -> Result<CalibrationStep, DesignerError> {
        match self.phase {
            CalibrationPhase::Idle => Err(DesignerError::InvalidCalibrationInput {
                reason: "calibration is not active".to_string(),
            }),
            CalibrationPhase::AwaitingFirstPoint => {
                self.points.push(position);
                self.phase = CalibrationPhase::AwaitingSecondPoint;
                Ok(CalibrationStep::PointRecorded)
            }
            CalibrationPhase::AwaitingSecondPoint => {
                self.points.push(position);
                let p1 = self.points[0];
                let p2 = self.points[1];
                self.reset_points();

                if line_length(p1, p2) <= f64::EPSILON {
                    return Err(Self::reject(prompt, "calibration points coincide"));
                }

                let Some(real_distance) = prompt.ask_number(CALIBRATION_PROMPT) else {
                    return Err(Self::reject(prompt, "no distance entered"));
                };

                match self.calibrate(p1, p2, real_distance) {
                    Ok(ratio) => {
                        prompt.notify(&format!("Scale set: {:.2} px/ft", ratio));
                        Ok(CalibrationStep::Calibrated(ratio))
                    }
                    Err(err) => {
                        tracing::warn!("Rejected calibration: {}", err);
                        prompt.notify(INVALID_DISTANCE_MESSAGE);
                        Err(err)
                    }
                }
            }
        }
    }

    fn reject(prompt: &mut dyn OperatorPrompt, reason: &str) -> DesignerError {
        tracing::warn!("Rejected calibration: {}", reason);
        prompt.notify(INVALID_DISTANCE_MESSAGE);
        DesignerError::InvalidCalibrationInput {
            reason: reason.to_string(),
        }
    }

    /// Derives and stores `line_length(p1, p2) / real_distance_ft`.
    ///
    /// Fully replaces any previous scale factor. Fails without touching
    /// state if the distance is not a positive finite number or the points
    /// coincide.
    pub fn calibrate(
        &mut self,
        p1: Point,
        p2: Point,
        real_distance_ft: f64,
    ) -> Result<f64, DesignerError> {
        if !real_distance_ft.is_finite() || real_distance_ft <= 0.0 {
            return Err(DesignerError::InvalidCalibrationInput {
                reason: format!("distance must be positive, got {}", real_distance_ft),
            });
        }
        let pixel_distance = line_length(p1, p2);
        if !pixel_distance.is_finite() || pixel_distance <= f64::EPSILON {
            return Err(DesignerError::InvalidCalibrationInput {
                reason: "calibration points coincide".to_string(),
            });
        }

        let ratio = pixel_distance / real_distance_ft;
        self.scale_factor = Some(ratio);
        tracing::info!("Scale calibrated: {:.2} px/ft", ratio);
        Ok(ratio)
    }

    /// Human readable scale, e.g. `Scale: 10.00 px/ft`.
    pub fn readout(&self) -> Option<String> {
        self.scale_factor
            .map(|ratio| format!("Scale: {:.2} px/ft", ratio))
    }
}
