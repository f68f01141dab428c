use crate::support::{assert_close, ScriptedPrompt};
use siteplan_designer::designer_state::PlacementDefaults;
use siteplan_designer::{
    AnnotationShape, DesignerState, DragHandle, HitTarget, Key, LabelField, Placement,
    PlacementTool, Point, PointerEvent, SceneStyle, TransformResult,
};

fn click(state: &mut DesignerState, x: f64, y: f64, target: HitTarget) {
    let mut prompt = ScriptedPrompt::default();
    state.pointer_down(&PointerEvent::primary(Point::new(x, y), target), &mut prompt);
    state.pointer_up(Point::new(x, y));
}

fn node(id: u64, suffix: &str) -> HitTarget {
    HitTarget::node(format!("{}{}", id, suffix))
}

#[test]
fn test_calibration_through_clicks() {
    let mut state = DesignerState::new();
    let mut prompt = ScriptedPrompt::answering(&[10.0]);

    state.begin_calibration();
    state.pointer_down(
        &PointerEvent::primary(Point::new(0.0, 0.0), HitTarget::Background),
        &mut prompt,
    );
    state.pointer_move(Point::new(60.0, 0.0));
    assert!(state.calibration.preview_segment().is_some());
    state.pointer_down(
        &PointerEvent::primary(Point::new(100.0, 0.0), HitTarget::Background),
        &mut prompt,
    );

    assert_eq!(state.scale_factor(), Some(10.0));
    assert!(!state.calibration.is_active());
    assert_eq!(state.scale_readout().as_deref(), Some("Scale: 10.00 px/ft"));
}

#[test]
fn test_calibration_takes_clicks_on_shapes() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();
    let mut prompt = ScriptedPrompt::answering(&[1.0]);

    state.begin_calibration();
    state.pointer_down(
        &PointerEvent::primary(Point::new(0.0, 0.0), node(id, "")),
        &mut prompt,
    );
    state.pointer_down(
        &PointerEvent::primary(Point::new(3.0, 4.0), node(id, "")),
        &mut prompt,
    );

    assert_eq!(state.scale_factor(), Some(5.0));
    assert_eq!(state.selected_id(), None);
    assert_eq!(state.shape(id).unwrap().shape.anchor(), Point::new(0.0, 0.0));
}

#[test]
fn test_begin_calibration_clears_other_modes() {
    let mut state = DesignerState::new();
    state
        .calibration
        .calibrate(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0)
        .unwrap();
    let id = state
        .place(
            Placement::Structure {
                length_ft: 2.0,
                width_ft: 2.0,
            },
            Point::new(0.0, 0.0),
        )
        .unwrap();
    state.canvas.select(Some(id));
    state.begin_label_edit(id, LabelField::Width).unwrap();
    state.arm_tool(PlacementTool::Well);

    state.begin_calibration();

    assert!(state.calibration.is_active());
    assert!(!state.label_editor.is_open());
    assert_eq!(state.armed_tool(), None);
    assert_eq!(state.selected_id(), None);
}

#[test]
fn test_armed_tool_places_on_background_and_disarms() {
    let mut state = DesignerState::new();
    state.arm_tool(PlacementTool::Ruler);

    click(&mut state, 20.0, 30.0, HitTarget::Background);

    assert_eq!(state.armed_tool(), None);
    assert_eq!(state.canvas.shape_count(), 1);
    let record = state.canvas.shapes().next().unwrap();
    let r = record.shape.as_ruler().unwrap();
    assert_eq!((r.x, r.y, r.x2, r.y2), (20.0, 30.0, 120.0, 30.0));
}

#[test]
fn test_armed_tool_ignores_clicks_on_shapes() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();
    state.arm_tool(PlacementTool::Septic);

    click(&mut state, 0.0, 0.0, node(id, ""));

    assert_eq!(state.canvas.shape_count(), 1);
    assert_eq!(state.armed_tool(), Some(PlacementTool::Septic));
    assert_eq!(state.selected_id(), Some(id));
}

#[test]
fn test_structure_tool_prompts_length_then_width() {
    let mut state = DesignerState::new();
    state
        .calibration
        .calibrate(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0)
        .unwrap();
    state.arm_tool(PlacementTool::Structure);

    let mut prompt = ScriptedPrompt::answering(&[5.0, 3.0]);
    state.pointer_down(
        &PointerEvent::primary(Point::new(50.0, 50.0), HitTarget::Background),
        &mut prompt,
    );

    assert_eq!(
        prompt.asked,
        vec![
            "Structure length (ft):".to_string(),
            "Structure width (ft):".to_string()
        ]
    );
    let record = state.canvas.shapes().next().unwrap();
    let s = record.shape.as_structure().unwrap();
    assert_eq!((s.width, s.length), (30.0, 50.0));
}

#[test]
fn test_cancelled_structure_prompt_creates_nothing() {
    let mut state = DesignerState::new();
    state.arm_tool(PlacementTool::Structure);

    let mut prompt = ScriptedPrompt::new([None]);
    state.pointer_down(
        &PointerEvent::primary(Point::new(5.0, 5.0), HitTarget::Background),
        &mut prompt,
    );

    assert_eq!(prompt.asked.len(), 1);
    assert_eq!(state.canvas.shape_count(), 0);
    assert_eq!(state.armed_tool(), None);

    state.arm_tool(PlacementTool::Structure);
    let mut prompt = ScriptedPrompt::new([Some(4.0), Some(-1.0)]);
    state.pointer_down(
        &PointerEvent::primary(Point::new(5.0, 5.0), HitTarget::Background),
        &mut prompt,
    );
    assert_eq!(state.canvas.shape_count(), 0);
}

#[test]
fn test_click_selects_and_background_deselects() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Ruler, Point::new(0.0, 0.0)).unwrap();

    click(&mut state, 100.0, 0.0, node(id, "_end"));
    assert_eq!(state.selected_id(), Some(id));

    click(&mut state, 400.0, 400.0, HitTarget::Background);
    assert_eq!(state.selected_id(), None);
}

#[test]
fn test_transformer_click_keeps_selection() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Septic, Point::new(0.0, 0.0)).unwrap();
    click(&mut state, 0.0, 0.0, node(id, ""));

    click(
        &mut state,
        10.0,
        10.0,
        HitTarget::node("transformer_bottom-right"),
    );
    assert_eq!(state.selected_id(), Some(id));
}

#[test]
fn test_body_drag_moves_anchor() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Well, Point::new(10.0, 10.0)).unwrap();
    let mut prompt = ScriptedPrompt::default();

    state.pointer_down(
        &PointerEvent::primary(Point::new(12.0, 14.0), node(id, "")),
        &mut prompt,
    );
    assert_eq!(state.drag_handle(), Some(DragHandle::Body));
    state.pointer_move(Point::new(32.0, 44.0));
    state.pointer_move(Point::new(42.0, 54.0));
    state.pointer_up(Point::new(42.0, 54.0));

    assert_eq!(state.shape(id).unwrap().shape.anchor(), Point::new(40.0, 50.0));
    assert_eq!(state.drag_handle(), None);

    // Moves after release do nothing
    state.pointer_move(Point::new(0.0, 0.0));
    assert_eq!(state.shape(id).unwrap().shape.anchor(), Point::new(40.0, 50.0));
}

#[test]
fn test_ruler_body_drag_moves_both_endpoints() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Ruler, Point::new(0.0, 0.0)).unwrap();
    let mut prompt = ScriptedPrompt::default();

    state.pointer_down(
        &PointerEvent::primary(Point::new(50.0, 0.0), node(id, "_body")),
        &mut prompt,
    );
    assert_eq!(state.drag_handle(), Some(DragHandle::RulerBody));
    state.pointer_move(Point::new(60.0, 10.0));
    state.pointer_move(Point::new(70.0, 10.0));

    let r = state.shape(id).unwrap().shape.as_ruler().unwrap().clone();
    assert_eq!((r.x, r.y, r.x2, r.y2), (20.0, 10.0, 120.0, 10.0));
}

#[test]
fn test_ruler_endpoint_drag_moves_one_end() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Ruler, Point::new(0.0, 0.0)).unwrap();
    let mut prompt = ScriptedPrompt::default();

    state.pointer_down(
        &PointerEvent::primary(Point::new(100.0, 0.0), node(id, "_end")),
        &mut prompt,
    );
    assert_eq!(state.drag_handle(), Some(DragHandle::RulerEnd));
    state.pointer_move(Point::new(100.0, 100.0));
    state.pointer_up(Point::new(100.0, 100.0));

    let r = state.shape(id).unwrap().shape.as_ruler().unwrap().clone();
    assert_eq!((r.x, r.y, r.x2, r.y2), (0.0, 0.0, 100.0, 100.0));

    state.pointer_down(
        &PointerEvent::primary(Point::new(0.0, 0.0), node(id, "_start")),
        &mut prompt,
    );
    assert_eq!(state.drag_handle(), Some(DragHandle::RulerStart));
    state.pointer_move(Point::new(-5.0, 7.0));

    let r = state.shape(id).unwrap().shape.as_ruler().unwrap().clone();
    assert_eq!((r.x, r.y, r.x2, r.y2), (-5.0, 7.0, 100.0, 100.0));
}

#[test]
fn test_structure_transform_bakes_scale() {
    let mut state = DesignerState::new();
    let id = state
        .place(
            Placement::Structure {
                length_ft: 50.0,
                width_ft: 30.0,
            },
            Point::new(50.0, 50.0),
        )
        .unwrap();

    let changed = state.end_transform(
        id,
        TransformResult {
            x: 55.0,
            y: 45.0,
            rotation: 30.0,
            scale_x: 2.0,
            scale_y: 0.5,
        },
    );

    assert!(changed);
    let s = state.shape(id).unwrap().shape.as_structure().unwrap().clone();
    assert_eq!((s.x, s.y, s.rotation), (55.0, 45.0, 30.0));
    assert_close(s.width, 60.0);
    assert_close(s.length, 25.0);
}

#[test]
fn test_septic_transform_keeps_scale() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Septic, Point::new(0.0, 0.0)).unwrap();

    assert!(state.end_transform(
        id,
        TransformResult {
            x: 5.0,
            y: 6.0,
            rotation: -20.0,
            scale_x: 0.8,
            scale_y: 0.6,
        },
    ));

    let icon = state.shape(id).unwrap().shape.as_icon().unwrap().clone();
    assert_eq!((icon.x, icon.y, icon.rotation), (5.0, 6.0, -20.0));
    assert_eq!((icon.scale_x, icon.scale_y), (0.8, 0.6));
    assert_eq!((icon.width, icon.length), (80.0, 80.0));
}

#[test]
fn test_tiny_transform_is_discarded() {
    let mut state = DesignerState::new();
    let structure = state
        .place(
            Placement::Structure {
                length_ft: 50.0,
                width_ft: 30.0,
            },
            Point::new(0.0, 0.0),
        )
        .unwrap();
    let septic = state.place(Placement::Septic, Point::new(0.0, 0.0)).unwrap();
    let before = (state.shape(structure).cloned(), state.shape(septic).cloned());

    let shrink = TransformResult {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale_x: 0.5,
        scale_y: 0.1,
    };
    assert!(!state.end_transform(structure, shrink));
    assert!(!state.end_transform(septic, shrink));
    assert_eq!(
        (state.shape(structure).cloned(), state.shape(septic).cloned()),
        before
    );
}

#[test]
fn test_transform_ignored_for_wells_and_rulers() {
    let mut state = DesignerState::new();
    let well = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();
    let result = TransformResult {
        x: 1.0,
        y: 1.0,
        rotation: 45.0,
        scale_x: 2.0,
        scale_y: 2.0,
    };
    assert!(!state.end_transform(well, result));
    assert!(!state.end_transform(well + 50, result));
}

#[test]
fn test_context_menu_delete() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Ruler, Point::new(0.0, 0.0)).unwrap();
    let mut prompt = ScriptedPrompt::default();

    state.pointer_down(
        &PointerEvent::secondary(Point::new(0.0, 0.0), node(id, "_start")),
        &mut prompt,
    );
    let menu = *state.context_menu().unwrap();
    assert_eq!(menu.target_id, id);
    assert_eq!(menu.position, Point::new(0.0, 0.0));

    assert!(state.confirm_context_delete());
    assert!(state.shape(id).is_none());
    assert!(state.context_menu().is_none());
}

#[test]
fn test_left_click_dismisses_context_menu() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();
    let mut prompt = ScriptedPrompt::default();

    state.pointer_down(
        &PointerEvent::secondary(Point::new(0.0, 0.0), node(id, "")),
        &mut prompt,
    );
    assert!(state.context_menu().is_some());

    click(&mut state, 300.0, 300.0, HitTarget::Background);
    assert!(state.context_menu().is_none());
    assert_eq!(state.canvas.shape_count(), 1);
    assert!(!state.confirm_context_delete());
}

#[test]
fn test_secondary_on_background_opens_nothing() {
    let mut state = DesignerState::new();
    let mut prompt = ScriptedPrompt::default();
    state.pointer_down(
        &PointerEvent::secondary(Point::new(1.0, 1.0), HitTarget::Background),
        &mut prompt,
    );
    assert!(state.context_menu().is_none());
}

#[test]
fn test_label_click_opens_editor_and_click_away_commits() {
    let mut state = DesignerState::new();
    state
        .calibration
        .calibrate(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0)
        .unwrap();
    let id = state
        .place(
            Placement::Structure {
                length_ft: 5.0,
                width_ft: 3.0,
            },
            Point::new(50.0, 50.0),
        )
        .unwrap();

    click(&mut state, 50.0, 30.0, node(id, "_label_width"));
    assert_eq!(state.selected_id(), Some(id));
    assert!(state.label_editor.is_editing(id, LabelField::Width));

    state.set_label_input("4");
    click(&mut state, 500.0, 500.0, HitTarget::Background);

    assert!(!state.label_editor.is_open());
    let s = state.shape(id).unwrap().shape.as_structure().unwrap().clone();
    assert_close(s.width, 40.0);
}

#[test]
fn test_escape_cancels_innermost_mode() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();
    let mut prompt = ScriptedPrompt::default();

    state.pointer_down(
        &PointerEvent::secondary(Point::new(0.0, 0.0), node(id, "")),
        &mut prompt,
    );
    state.arm_tool(PlacementTool::Well);

    assert!(state.key_down(Key::Escape));
    assert_eq!(state.armed_tool(), None);
    assert!(state.context_menu().is_some());

    assert!(state.key_down(Key::Escape));
    assert!(state.context_menu().is_none());

    assert!(!state.key_down(Key::Escape));
    assert!(!state.key_down(Key::Enter));

    state.begin_calibration();
    assert!(state.key_down(Key::Escape));
    assert!(!state.calibration.is_active());
}

#[test]
fn test_custom_defaults_apply_to_placement() {
    let defaults = PlacementDefaults {
        icon_size_px: 40.0,
        ruler_offset_px: 250.0,
        ..PlacementDefaults::default()
    };
    let mut state = DesignerState::with_defaults(defaults, SceneStyle::default());

    let ruler = state.place(Placement::Ruler, Point::new(0.0, 0.0)).unwrap();
    let well = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();

    assert_eq!(state.shape(ruler).unwrap().shape.as_ruler().unwrap().x2, 250.0);
    assert_eq!(state.shape(well).unwrap().shape.as_icon().unwrap().width, 40.0);
}

#[test]
fn test_deleting_dragged_shape_ends_drag() {
    let mut state = DesignerState::new();
    let id = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();
    let mut prompt = ScriptedPrompt::default();

    state.pointer_down(
        &PointerEvent::primary(Point::new(0.0, 0.0), node(id, "")),
        &mut prompt,
    );
    assert!(state.delete_shape(id));
    assert_eq!(state.drag_handle(), None);
    state.pointer_move(Point::new(5.0, 5.0));
    assert_eq!(state.canvas.shape_count(), 0);
}
