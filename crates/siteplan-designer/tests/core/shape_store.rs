use siteplan_designer::{
    AnnotationShape, DesignerState, IconShape, Placement, Point, RulerShape, Shape, ShapeKind,
    ShapePatch, ShapeRecord, ShapeStore, StructureShape,
};

fn structure_at(x: f64, y: f64) -> Shape {
    Shape::Structure(StructureShape::new(Point::new(x, y), 30.0, 50.0))
}

#[test]
fn test_ids_are_monotonic_and_never_reused() {
    let mut state = DesignerState::new();
    let a = state.place(Placement::Well, Point::new(0.0, 0.0)).unwrap();
    let b = state.place(Placement::Septic, Point::new(0.0, 0.0)).unwrap();
    assert!(b > a);

    assert!(state.delete_shape(b));
    let c = state.place(Placement::Ruler, Point::new(0.0, 0.0)).unwrap();
    assert!(c > b);
    assert_eq!(state.canvas.shape_count(), 2);
}

#[test]
fn test_place_defaults() {
    let mut state = DesignerState::new();

    let ruler = state.place(Placement::Ruler, Point::new(0.0, 0.0)).unwrap();
    let r = state.shape(ruler).unwrap().shape.as_ruler().unwrap().clone();
    assert_eq!((r.x, r.y, r.x2, r.y2), (0.0, 0.0, 100.0, 0.0));

    let well = state.place(Placement::Well, Point::new(10.0, 20.0)).unwrap();
    let icon = state.shape(well).unwrap().shape.as_icon().unwrap().clone();
    assert_eq!((icon.x, icon.y), (10.0, 20.0));
    assert_eq!((icon.width, icon.length), (80.0, 80.0));
    assert_eq!((icon.scale_x, icon.scale_y), (1.0, 1.0));

    let septic = state.place(Placement::Septic, Point::new(5.0, 5.0)).unwrap();
    let icon = state.shape(septic).unwrap().shape.as_icon().unwrap().clone();
    assert_eq!((icon.scale_x, icon.scale_y), (0.5, 0.5));
    assert_eq!(state.shape(septic).unwrap().kind(), ShapeKind::Septic);
}

#[test]
fn test_structure_placement_uses_scale() {
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

    let s = state.shape(id).unwrap().shape.as_structure().unwrap().clone();
    assert_eq!((s.x, s.y), (50.0, 50.0));
    assert_eq!(s.width, 30.0);
    assert_eq!(s.length, 50.0);
    assert_eq!(s.rotation, 0.0);
}

#[test]
fn test_structure_placement_without_calibration_uses_one_px_per_ft() {
    let mut state = DesignerState::new();
    let id = state
        .place(
            Placement::Structure {
                length_ft: 12.0,
                width_ft: 8.0,
            },
            Point::new(0.0, 0.0),
        )
        .unwrap();
    let s = state.shape(id).unwrap().shape.as_structure().unwrap().clone();
    assert_eq!((s.width, s.length), (8.0, 12.0));
}

#[test]
fn test_invalid_structure_dimensions_create_nothing() {
    let mut state = DesignerState::new();
    for (length_ft, width_ft) in [(0.0, 3.0), (5.0, -1.0), (f64::NAN, 2.0)] {
        let result = state.place(
            Placement::Structure {
                length_ft,
                width_ft,
            },
            Point::new(0.0, 0.0),
        );
        assert!(result.is_err());
    }
    assert_eq!(state.canvas.shape_count(), 0);
}

#[test]
fn test_update_merges_only_given_fields() {
    let mut state = DesignerState::new();
    let id = state.canvas.add_shape(structure_at(10.0, 10.0));

    assert!(state.update_shape(id, ShapePatch::position(40.0, 60.0)));
    let s = state.shape(id).unwrap().shape.as_structure().unwrap().clone();
    assert_eq!((s.x, s.y, s.width, s.length), (40.0, 60.0, 30.0, 50.0));

    assert!(state.update_shape(id, ShapePatch::new().with_rotation(15.0)));
    let s = state.shape(id).unwrap().shape.as_structure().unwrap().clone();
    assert_eq!((s.x, s.y, s.rotation), (40.0, 60.0, 15.0));
}

#[test]
fn test_update_unknown_id_is_noop() {
    let mut state = DesignerState::new();
    let id = state.canvas.add_shape(structure_at(10.0, 10.0));
    let before = state.shape(id).cloned();

    assert!(!state.update_shape(id + 100, ShapePatch::position(1.0, 1.0)));
    assert_eq!(state.shape(id).cloned(), before);
}

#[test]
fn test_update_drops_non_finite_and_clamps_negative() {
    let mut state = DesignerState::new();
    let id = state.canvas.add_shape(structure_at(10.0, 10.0));

    let patch = ShapePatch::position(f64::NAN, 25.0).with_width(-5.0);
    assert!(state.update_shape(id, patch));

    let s = state.shape(id).unwrap().shape.as_structure().unwrap().clone();
    assert_eq!(s.x, 10.0);
    assert_eq!(s.y, 25.0);
    assert_eq!(s.width, 0.0);
    assert_eq!(s.length, 50.0);
}

#[test]
fn test_delete_clears_selection_only_if_selected() {
    let mut state = DesignerState::new();
    let a = state.canvas.add_shape(structure_at(0.0, 0.0));
    let b = state.canvas.add_shape(structure_at(100.0, 0.0));

    state.canvas.select(Some(a));
    assert!(state.delete_shape(b));
    assert_eq!(state.selected_id(), Some(a));
    assert!(state.shape(b).is_none());

    assert!(state.delete_shape(a));
    assert_eq!(state.selected_id(), None);
    assert_eq!(state.canvas.shape_count(), 0);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut state = DesignerState::new();
    let a = state.canvas.add_shape(structure_at(0.0, 0.0));
    state.canvas.select(Some(a));

    assert!(!state.delete_shape(a + 1));
    assert_eq!(state.canvas.shape_count(), 1);
    assert_eq!(state.selected_id(), Some(a));
}

#[test]
fn test_find_containing_shape_strips_suffixes() {
    let mut store = ShapeStore::new();
    let id = store.generate_id();
    store.insert(ShapeRecord::new(id, structure_at(0.0, 0.0)));

    assert_eq!(store.find_containing_shape(&id.to_string()), Some(id));
    assert_eq!(store.find_containing_shape(&format!("{}_start", id)), Some(id));
    assert_eq!(
        store.find_containing_shape(&format!("{}_label_width", id)),
        Some(id)
    );
    assert_eq!(store.find_containing_shape("transformer_top-left"), None);
    assert_eq!(store.find_containing_shape("999_end"), None);
    assert_eq!(store.find_containing_shape(""), None);
}

#[test]
fn test_store_iterates_in_insertion_order() {
    let mut store = ShapeStore::new();
    let ids: Vec<u64> = (0..3)
        .map(|i| {
            let id = store.generate_id();
            store.insert(ShapeRecord::new(id, structure_at(i as f64, 0.0)));
            id
        })
        .collect();

    store.remove(ids[1]);
    let order: Vec<u64> = store.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![ids[0], ids[2]]);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_select_rejects_unknown_id() {
    let mut state = DesignerState::new();
    let a = state.canvas.add_shape(structure_at(0.0, 0.0));
    assert_eq!(state.canvas.select(Some(a + 7)), None);
    assert_eq!(state.canvas.select(Some(a)), Some(a));
}

#[test]
fn test_clear_keeps_ids_monotonic() {
    let mut state = DesignerState::new();
    let a = state.canvas.add_shape(structure_at(0.0, 0.0));
    state.canvas.select(Some(a));
    state.canvas.clear();

    assert_eq!(state.canvas.shape_count(), 0);
    assert_eq!(state.selected_id(), None);
    let b = state.canvas.add_shape(structure_at(0.0, 0.0));
    assert!(b > a);
}

#[test]
fn test_rotated_structure_bounds() {
    let mut s = StructureShape::new(Point::new(10.0, 10.0), 30.0, 50.0);
    s.rotation = 90.0;
    let (min_x, min_y, max_x, max_y) = Shape::Structure(s).bounds();
    assert!((min_x - -40.0).abs() < 1e-3);
    assert!((min_y - 10.0).abs() < 1e-3);
    assert!((max_x - 10.0).abs() < 1e-3);
    assert!((max_y - 40.0).abs() < 1e-3);
}

#[test]
fn test_well_bounds_follow_marker() {
    let well = Shape::Well(IconShape::new(Point::new(100.0, 50.0), 80.0, 1.0));
    let (min_x, min_y, max_x, max_y) = well.bounds();
    assert!((min_x - 92.0).abs() < 0.1);
    assert!((min_y - 42.0).abs() < 0.1);
    assert!((max_x - 108.0).abs() < 0.1);
    assert!((max_y - 58.0).abs() < 0.1);
}

#[test]
fn test_septic_bounds_scale_with_icon() {
    let small = Shape::Septic(IconShape::new(Point::new(0.0, 0.0), 80.0, 0.5)).bounds();
    let large = Shape::Septic(IconShape::new(Point::new(0.0, 0.0), 80.0, 1.0)).bounds();
    let small_w = small.2 - small.0;
    let large_w = large.2 - large.0;
    assert!((large_w - 2.0 * small_w).abs() < 0.5);
    assert!(large_w > 100.0);
}

#[test]
fn test_translate_moves_every_point() {
    let mut ruler = Shape::Ruler(RulerShape::new(Point::new(0.0, 0.0), Point::new(10.0, 5.0)));
    ruler.translate(3.0, -2.0);
    let r = ruler.as_ruler().unwrap();
    assert_eq!((r.x, r.y, r.x2, r.y2), (3.0, -2.0, 13.0, 3.0));
    assert_eq!(ruler.anchor(), Point::new(3.0, -2.0));
    assert_eq!(ruler.bounds(), (3.0, -2.0, 13.0, 3.0));
    assert!(ruler.render().iter().count() > 0);
}

#[test]
fn test_kind_metadata() {
    assert!(ShapeKind::Structure.is_transformable());
    assert!(ShapeKind::Septic.is_transformable());
    assert!(!ShapeKind::Well.is_transformable());
    assert!(!ShapeKind::Ruler.is_transformable());
    assert_eq!(ShapeKind::Septic.name(), "septic");
}
