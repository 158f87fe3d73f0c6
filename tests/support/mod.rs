//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use esm_case::{
    app::UserInterface,
    construction::ConstructionPlane,
    design::Design,
    float_types::Real,
    mesh::{polygon::Polygon, vertex::Vertex},
    sketch::Profile,
};
use nalgebra::{Point2, Point3, Vector3};
use std::cell::RefCell;

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box<S: Clone>(polygons: &[Polygon<S>]) -> [Real; 6] {
    let mut bb = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        Real::MIN,
        Real::MIN,
        Real::MIN,
    ];
    for v in polygons.iter().flat_map(|p| &p.vertices) {
        for axis in 0..3 {
            bb[axis] = bb[axis].min(v.pos[axis]);
            bb[axis + 3] = bb[axis + 3].max(v.pos[axis]);
        }
    }
    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(verts, None)
}

/// Sketch a centred `w x h` rectangle on `plane` and return its profile.
pub fn rectangle_profile(design: &mut Design, plane: ConstructionPlane, w: Real, h: Real) -> Profile {
    let id = design.add_sketch(plane);
    let sketch = design.sketch_mut(id).unwrap();
    sketch.add_center_point_rectangle(Point2::origin(), Point2::new(w / 2.0, h / 2.0));
    sketch.profile(0).unwrap()
}

/// Area of a circle tessellated into `segments` straight edges.
pub fn polygon_circle_area(radius: Real, segments: usize) -> Real {
    let n = segments as Real;
    0.5 * n * radius * radius * (esm_case::float_types::TAU / n).sin()
}

/// Collects every message box shown.
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub messages: RefCell<Vec<String>>,
}

impl UserInterface for RecordingUi {
    fn message_box(&self, text: &str) {
        self.messages.borrow_mut().push(text.to_string());
    }
}
