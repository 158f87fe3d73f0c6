mod support;

use approx::assert_relative_eq;
use esm_case::{
    app::{self, Application, SUCCESS_MESSAGE},
    case::{CaseParams, VentSpec, Wall, build_case, wall_sketch_plane},
    construction::ConstructionPlane,
    design::Design,
    errors::ModelError,
    features::{ExtentDirection, FeatureOperation},
    float_types::Real,
};
use nalgebra::{Point2, Point3, Vector3};

use crate::support::{RecordingUi, polygon_circle_area};

/// Volume of the plain open-top shell minus every hole and slot.
fn expected_volume(p: &CaseParams) -> Real {
    let t = p.thickness;
    let outer = p.width * p.height * p.depth;
    let cavity = (p.width - 2.0 * t) * (p.height - 2.0 * t) * (p.depth - t);
    let holes: Real = p
        .holes()
        .iter()
        .map(|(_, h)| polygon_circle_area(h.radius(), p.circle_segments) * t)
        .sum();
    let vents = p.vents.count as Real * p.vents.slot_width * p.vents.slot_length * t;
    outer - cavity - holes - vents
}

#[test]
fn default_case_dimensions_and_volume() {
    let params = CaseParams::default();
    let mut design = Design::new();
    let report = build_case(&mut design, &params).unwrap();

    assert_eq!(report.name, "ESM_Case");
    assert_eq!(design.bodies().len(), 1);
    assert_relative_eq!(report.size, Vector3::new(90.0, 59.0, 50.0), epsilon = 1e-9);
    assert_relative_eq!(report.volume, expected_volume(&params), epsilon = 1e-4);
    // base sketch, extrude, shell, three hole sketches and cuts, vent
    // sketch and ten vent cuts
    assert_eq!(report.features, 3 + 6 + 1 + 10);

    let body = design.body_by_name("ESM_Case").unwrap();
    let bb = body.bounding_box();
    assert_relative_eq!(bb.mins, Point3::new(-45.0, -29.5, 0.0), epsilon = 1e-9);
}

#[test]
fn holes_go_through_the_walls() {
    let params = CaseParams::default();
    let mut design = Design::new();
    let report = build_case(&mut design, &params).unwrap();
    let mesh = &design.body(report.body).unwrap().mesh;

    // inside each wall, at the hole centre: empty
    assert!(!mesh.contains_point(&Point3::new(43.5, 0.3, 25.2)));
    assert!(!mesh.contains_point(&Point3::new(-43.5, 0.3, 20.2)));
    assert!(!mesh.contains_point(&Point3::new(-43.5, 0.3, 38.2)));
    // inside each wall, clear of the holes: material
    assert!(mesh.contains_point(&Point3::new(43.5, 0.3, 47.2)));
    assert!(mesh.contains_point(&Point3::new(-43.5, 0.3, 6.2)));
    assert!(mesh.contains_point(&Point3::new(-43.5, 15.3, 30.2)));
    // the Y walls are untouched
    assert!(mesh.contains_point(&Point3::new(0.3, 28.0, 25.2)));
    assert!(mesh.contains_point(&Point3::new(0.3, -28.0, 25.2)));

    // through the speaker hole, across the cavity, into the far wall
    let hits = mesh.ray_intersections(&Point3::new(50.0, 10.3, 33.2), &-Vector3::x());
    assert_relative_eq!(hits[0].1, 92.0, epsilon = 1e-9);
    // the same ray height beside the hole stops at the near wall
    let hits = mesh.ray_intersections(&Point3::new(50.0, 24.3, 33.2), &-Vector3::x());
    assert_relative_eq!(hits[0].1, 5.0, epsilon = 1e-9);
}

#[test]
fn vent_slots_go_through_the_floor() {
    let params = CaseParams::default();
    let mut design = Design::new();
    let report = build_case(&mut design, &params).unwrap();
    let mesh = &design.body(report.body).unwrap().mesh;

    for x in params.vents.slot_centers() {
        let hits = mesh.ray_intersections(&Point3::new(x + 0.1, 0.3, -10.0), &Vector3::z());
        assert!(hits.is_empty(), "slot at x = {x} is blocked");

        let beside = x - 2.1 * x.signum();
        let hits = mesh.ray_intersections(&Point3::new(beside, 0.3, -10.0), &Vector3::z());
        assert_eq!(hits.len(), 2, "floor missing beside slot at x = {x}");
        assert_relative_eq!(hits[0].1, 10.0, epsilon = 1e-9);
    }
}

#[test]
fn cut_inside_the_cavity_finds_no_target() {
    let params = CaseParams {
        vents: VentSpec {
            count: 0,
            ..Default::default()
        },
        ..CaseParams::default()
    };
    let mut design = Design::new();
    let report = build_case(&mut design, &params).unwrap();
    let entries = design.timeline().len();

    let id = design.add_sketch(ConstructionPlane::xy().offset(20.0));
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_center_point_rectangle(Point2::origin(), Point2::new(5.0, 5.0));
    let block = sketch.profile(0).unwrap();
    let err = design
        .add_simple_extrude(&block, 5.0, FeatureOperation::Cut)
        .unwrap_err();

    assert!(matches!(err, ModelError::NoTargetBody { .. }));
    // only the sketch was added
    assert_eq!(design.timeline().len(), entries + 1);
    assert_relative_eq!(
        design.body(report.body).unwrap().volume(),
        report.volume,
        epsilon = 1e-9
    );
}

#[test]
fn holes_follow_their_wall() {
    let params = CaseParams {
        speaker: esm_case::case::HoleSpec::new(20.0, Wall::PosY, 0.0, 25.0),
        ..CaseParams::default()
    };
    params.validate().unwrap();
    let mut design = Design::new();
    let report = build_case(&mut design, &params).unwrap();
    let mesh = &design.body(report.body).unwrap().mesh;
    assert!(!mesh.contains_point(&Point3::new(0.3, 28.0, 25.2)));
    assert!(mesh.contains_point(&Point3::new(43.5, 0.3, 25.2)));
    assert_relative_eq!(report.volume, expected_volume(&params), epsilon = 1e-4);
}

#[test]
fn wall_planes_sit_outside_the_case() {
    let params = CaseParams::default();
    for (wall, origin, direction) in [
        (Wall::PosX, Point3::new(46.0, 0.0, 0.0), ExtentDirection::Negative),
        (Wall::NegX, Point3::new(-46.0, 0.0, 0.0), ExtentDirection::Positive),
        (Wall::PosY, Point3::new(0.0, 30.5, 0.0), ExtentDirection::Positive),
        (Wall::NegY, Point3::new(0.0, -30.5, 0.0), ExtentDirection::Negative),
    ] {
        let (plane, dir) = wall_sketch_plane(&params, wall);
        assert_relative_eq!(plane.to_world(&Point2::origin()), origin, epsilon = 1e-12);
        assert_eq!(dir, direction);
    }
}

#[test]
fn rerunning_replaces_the_case() {
    let params = CaseParams::default();
    let mut application = Application::new(RecordingUi::default());
    let first = app::run(&mut application, &params).unwrap();
    let second = app::run(&mut application, &params).unwrap();

    assert_eq!(application.design.bodies().len(), 1);
    assert_eq!(application.design.bodies()[0].name, "ESM_Case");
    assert_relative_eq!(first.volume, second.volume, epsilon = 1e-9);
    assert_eq!(
        *application.ui.messages.borrow(),
        vec![SUCCESS_MESSAGE.to_string(), SUCCESS_MESSAGE.to_string()]
    );
}

#[test]
fn invalid_parameters_report_the_error_chain() {
    let mut params = CaseParams::default();
    params.speaker.diameter = 70.0;
    let mut application = Application::new(RecordingUi::default());
    let err = app::run(&mut application, &params).unwrap_err();
    assert!(format!("{err:#}").contains("speaker hole"));

    let messages = application.ui.messages.borrow();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Failed:\n"));
    assert!(messages[0].contains("invalid case parameters"));
    assert!(messages[0].contains("HoleOutsideWall"));
}

#[test]
fn failed_run_still_clears_old_bodies() {
    let mut application = Application::new(RecordingUi::default());
    app::run(&mut application, &CaseParams::default()).unwrap();
    let bad = CaseParams {
        thickness: 40.0,
        ..CaseParams::default()
    };
    assert!(app::run(&mut application, &bad).is_err());
    assert!(application.design.bodies().is_empty());
    // the sketches of the first run are kept
    assert!(!application.design.sketches().is_empty());
}
