mod support;

use approx::assert_relative_eq;
use esm_case::{
    construction::ConstructionPlane,
    design::Design,
    errors::{ModelError, ValidationError},
    sketch::SurfaceType,
};
use nalgebra::{Point2, Point3};

use crate::support::polygon_circle_area;

#[test]
fn rectangle_yields_one_profile() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    let lines = sketch.add_center_point_rectangle(Point2::new(1.0, 1.0), Point2::new(3.0, 2.0));
    assert_eq!(lines, [0, 1, 2, 3]);

    let profiles = sketch.profiles().unwrap();
    assert_eq!(profiles.len(), 1);
    let profile = &profiles[0];
    assert_relative_eq!(profile.area(), 8.0, epsilon = 1e-12);
    assert!(profile.holes.is_empty());
    assert!(profile.outer.signed_area() > 0.0);
    assert!(profile.outer.edges.iter().all(|e| e.surface == SurfaceType::Plane));
    let c = profile.centroid().unwrap();
    assert_relative_eq!(c, Point2::new(1.0, 1.0), epsilon = 1e-12);
}

#[test]
fn loose_lines_in_any_order_close_a_loop() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_line(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
    sketch.add_line(Point2::new(0.0, 3.0), Point2::new(0.0, 0.0));
    sketch.add_line(Point2::new(4.0, 0.0), Point2::new(0.0, 3.0));

    let profiles = sketch.profiles().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_relative_eq!(profiles[0].area(), 6.0, epsilon = 1e-12);
}

#[test]
fn nested_circle_becomes_a_hole() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_two_point_rectangle(Point2::new(-5.0, -5.0), Point2::new(5.0, 5.0));
    let circle = sketch.add_circle_by_center_radius(Point2::new(1.0, 0.0), 2.0);
    let segments = sketch.circle_segments();

    let profiles = sketch.profiles().unwrap();
    assert_eq!(profiles.len(), 2);

    let ring = &profiles[0];
    assert_eq!(ring.holes.len(), 1);
    assert!(ring.holes[0].signed_area() < 0.0);
    assert_relative_eq!(
        ring.area(),
        100.0 - polygon_circle_area(2.0, segments),
        epsilon = 1e-9
    );

    let disc = &profiles[1];
    assert!(disc.holes.is_empty());
    assert!(disc.outer.edges.iter().all(|e| e.curve == circle && e.surface == SurfaceType::Cylinder));
}

#[test]
fn open_chain_has_no_profile() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
    sketch.add_line(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0));

    assert!(sketch.profiles().unwrap().is_empty());
    assert_eq!(
        sketch.profile(0).unwrap_err(),
        ModelError::NoProfiles {
            sketch: "Sketch1".to_string()
        }
    );
}

#[test]
fn profile_index_out_of_range() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_circle_by_center_radius(Point2::origin(), 1.0);
    assert_eq!(
        sketch.profile(3).unwrap_err(),
        ModelError::ProfileIndex { index: 3, len: 1 }
    );
}

#[test]
fn crossing_rectangles_are_rejected() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_two_point_rectangle(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
    sketch.add_two_point_rectangle(Point2::new(1.0, 1.0), Point2::new(3.0, 3.0));
    assert_eq!(
        sketch.profiles().unwrap_err(),
        ValidationError::CrossingCurves { first: 0, second: 4 }
    );
}

#[test]
fn branching_lines_are_rejected() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_two_point_rectangle(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
    sketch.add_line(Point2::new(2.0, 2.0), Point2::new(4.0, 4.0));
    assert!(matches!(
        sketch.profiles(),
        Err(ValidationError::BranchingCurves { degree: 3, .. })
    ));
}

#[test]
fn non_positive_radius_is_rejected() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_circle_by_center_radius(Point2::origin(), 0.0);
    assert!(matches!(
        sketch.profiles(),
        Err(ValidationError::NonPositiveDimension { .. })
    ));
}

#[test]
fn side_plane_sketch_maps_into_model_space() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::yz().offset(10.0));
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_circle_by_center_radius(Point2::new(3.0, 7.0), 1.0);
    let profile = sketch.profile(0).unwrap();
    let center = profile.world_centroid().unwrap();
    assert_relative_eq!(center, Point3::new(10.0, 3.0, 7.0), epsilon = 1e-9);
}

#[test]
fn inset_shrinks_outer_and_grows_holes() {
    let mut design = Design::new();
    let id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_two_point_rectangle(Point2::new(0.0, 0.0), Point2::new(10.0, 6.0));
    let profile = sketch.profile(0).unwrap();

    let inner = profile.inset(1.0).unwrap();
    assert_relative_eq!(inner.area(), 8.0 * 4.0, epsilon = 1e-9);
    assert_eq!(
        profile.inset(3.0).unwrap_err(),
        ValidationError::OffsetCollapsed { distance: 3.0 }
    );
}
