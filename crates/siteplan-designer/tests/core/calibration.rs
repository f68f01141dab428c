use crate::support::{assert_close, ScriptedPrompt};
use siteplan_core::DesignerError;
use siteplan_designer::calibration::{CALIBRATION_PROMPT, INVALID_DISTANCE_MESSAGE};
use siteplan_designer::prompt::parse_prompt_number;
use siteplan_designer::{CalibrationPhase, CalibrationStep, NoPrompt, Point, ScaleCalibration};

fn run(cal: &mut ScaleCalibration, p1: Point, p2: Point, prompt: &mut ScriptedPrompt) {
    cal.begin();
    assert_eq!(
        cal.record_click(p1, prompt),
        Ok(CalibrationStep::PointRecorded)
    );
    let _ = cal.record_click(p2, prompt);
}

#[test]
fn test_new_calibration_is_idle_and_unscaled() {
    let cal = ScaleCalibration::new();
    assert_eq!(cal.phase(), CalibrationPhase::Idle);
    assert!(!cal.is_active());
    assert_eq!(cal.scale_factor(), None);
    assert_eq!(cal.effective_scale(), 1.0);
    assert_eq!(cal.readout(), None);
}

#[test]
fn test_two_clicks_set_scale() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::answering(&[10.0]);

    run(&mut cal, Point::new(0.0, 0.0), Point::new(100.0, 0.0), &mut prompt);

    assert_eq!(cal.phase(), CalibrationPhase::Idle);
    assert_eq!(cal.scale_factor(), Some(10.0));
    assert!(cal.points().is_empty());
    assert_eq!(prompt.asked, vec![CALIBRATION_PROMPT.to_string()]);
    assert_eq!(prompt.notices, vec!["Scale set: 10.00 px/ft".to_string()]);
    assert_eq!(cal.readout().as_deref(), Some("Scale: 10.00 px/ft"));
}

#[test]
fn test_phases_advance_per_click() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::answering(&[5.0]);

    cal.begin();
    assert_eq!(cal.phase(), CalibrationPhase::AwaitingFirstPoint);
    cal.record_click(Point::new(0.0, 0.0), &mut prompt).unwrap();
    assert_eq!(cal.phase(), CalibrationPhase::AwaitingSecondPoint);
    assert_eq!(cal.points(), &[Point::new(0.0, 0.0)]);
    assert!(prompt.asked.is_empty());

    let step = cal.record_click(Point::new(0.0, 50.0), &mut prompt).unwrap();
    assert_eq!(step, CalibrationStep::Calibrated(10.0));
}

#[test]
fn test_preview_follows_hover_after_first_point() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::default();

    cal.begin();
    cal.update_hover(Point::new(5.0, 5.0));
    assert_eq!(cal.preview_segment(), None);

    cal.record_click(Point::new(1.0, 1.0), &mut prompt).unwrap();
    assert_eq!(cal.preview_segment(), None);
    cal.update_hover(Point::new(40.0, 2.0));
    assert_eq!(
        cal.preview_segment(),
        Some((Point::new(1.0, 1.0), Point::new(40.0, 2.0)))
    );
}

#[test]
fn test_recalibration_replaces_scale() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::answering(&[10.0, 4.0]);

    run(&mut cal, Point::new(0.0, 0.0), Point::new(100.0, 0.0), &mut prompt);
    run(&mut cal, Point::new(0.0, 0.0), Point::new(0.0, 20.0), &mut prompt);

    assert_eq!(cal.scale_factor(), Some(5.0));
}

#[test]
fn test_invalid_distance_keeps_prior_scale() {
    for answer in [Some(0.0), Some(-3.0), Some(f64::NAN), None] {
        let mut cal = ScaleCalibration::new();
        cal.calibrate(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 5.0)
            .unwrap();

        let mut prompt = ScriptedPrompt::new([answer]);
        cal.begin();
        cal.record_click(Point::new(0.0, 0.0), &mut prompt).unwrap();
        let result = cal.record_click(Point::new(100.0, 0.0), &mut prompt);

        assert!(matches!(
            result,
            Err(DesignerError::InvalidCalibrationInput { .. })
        ));
        assert_eq!(cal.scale_factor(), Some(10.0));
        assert_eq!(cal.phase(), CalibrationPhase::Idle);
        assert!(cal.points().is_empty());
        assert_eq!(prompt.notices, vec![INVALID_DISTANCE_MESSAGE.to_string()]);
    }
}

#[test]
fn test_coincident_points_rejected_without_prompt() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::answering(&[10.0]);

    run(&mut cal, Point::new(7.0, 7.0), Point::new(7.0, 7.0), &mut prompt);

    assert!(prompt.asked.is_empty());
    assert_eq!(cal.scale_factor(), None);
    assert_eq!(prompt.notices, vec![INVALID_DISTANCE_MESSAGE.to_string()]);
}

#[test]
fn test_click_while_idle_is_rejected() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::default();
    assert!(cal.record_click(Point::new(0.0, 0.0), &mut prompt).is_err());
    assert!(cal.points().is_empty());
}

#[test]
fn test_begin_discards_in_flight_points() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::answering(&[2.0]);

    cal.begin();
    cal.record_click(Point::new(0.0, 0.0), &mut prompt).unwrap();
    cal.begin();
    assert!(cal.points().is_empty());
    assert_eq!(cal.phase(), CalibrationPhase::AwaitingFirstPoint);

    cal.record_click(Point::new(10.0, 0.0), &mut prompt).unwrap();
    cal.record_click(Point::new(30.0, 0.0), &mut prompt).unwrap();
    assert_close(cal.effective_scale(), 10.0);
}

#[test]
fn test_cancel_returns_to_idle() {
    let mut cal = ScaleCalibration::new();
    let mut prompt = ScriptedPrompt::default();
    cal.begin();
    cal.record_click(Point::new(0.0, 0.0), &mut prompt).unwrap();
    cal.cancel();
    assert!(!cal.is_active());
    assert!(cal.points().is_empty());
    assert_eq!(cal.preview_segment(), None);
}

#[test]
fn test_no_prompt_cancels_calibration() {
    let mut cal = ScaleCalibration::new();
    cal.calibrate(Point::new(0.0, 0.0), Point::new(20.0, 0.0), 2.0)
        .unwrap();

    let mut prompt = NoPrompt;
    cal.begin();
    cal.record_click(Point::new(0.0, 0.0), &mut prompt).unwrap();
    assert!(cal.record_click(Point::new(9.0, 0.0), &mut prompt).is_err());
    assert_eq!(cal.scale_factor(), Some(10.0));
}

#[test]
fn test_prompt_number_parsing() {
    assert_eq!(parse_prompt_number("12.5"), Some(12.5));
    assert_eq!(parse_prompt_number(" 40 ft"), Some(40.0));
    assert_eq!(parse_prompt_number(""), None);
    assert_eq!(parse_prompt_number("ten"), None);
}
