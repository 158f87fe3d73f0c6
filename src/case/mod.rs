//! The ESM enclosure: a shelled box with speaker, button and potentiometer
//! holes in its side walls and a row of vent slots in its floor.

pub mod params;

pub use params::{CaseParams, HoleSpec, VentSpec, Wall};

use crate::construction::ConstructionPlane;
use crate::design::{BRepFace, BodyId, Design};
use crate::errors::ModelError;
use crate::features::{ExtentDirection, ExtrudeInput, FeatureOperation, ShellInput};
use crate::float_types::Real;
use crate::sketch::SurfaceType;
use nalgebra::{Point2, Vector3};
use tracing::{debug, info};

/// Summary of a finished case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub body: BodyId,
    pub name: String,
    pub volume: Real,
    pub triangles: usize,
    /// Bounding box extent along X, Y and Z.
    pub size: Vector3<Real>,
    /// Timeline entries the build added.
    pub features: usize,
}

/// Sketch plane for cutting through `wall`, sitting `clearance` outside it,
/// and the extent direction pointing into the case.
pub fn wall_sketch_plane(params: &CaseParams, wall: Wall) -> (ConstructionPlane, ExtentDirection) {
    let x = params.width / 2.0 + params.clearance;
    let y = params.height / 2.0 + params.clearance;
    match wall {
        Wall::PosX => (ConstructionPlane::yz().offset(x), ExtentDirection::Negative),
        Wall::NegX => (ConstructionPlane::yz().offset(-x), ExtentDirection::Positive),
        // XZ faces -Y, so positive offsets move toward -Y.
        Wall::PosY => (ConstructionPlane::xz().offset(-y), ExtentDirection::Positive),
        Wall::NegY => (ConstructionPlane::xz().offset(y), ExtentDirection::Negative),
    }
}

/// The open face of the shell: the planar face looking up.
fn top_faces(design: &Design, body: BodyId) -> Result<Vec<BRepFace>, ModelError> {
    let body = design.body(body).ok_or(ModelError::UnknownBody(body.0))?;
    Ok(body
        .faces()
        .into_iter()
        .filter(|f| f.surface == SurfaceType::Plane && f.normal.is_some_and(|n| n.z > 0.9))
        .collect())
}

fn cut_hole(
    design: &mut Design,
    params: &CaseParams,
    name: &str,
    hole: &HoleSpec,
) -> Result<(), ModelError> {
    let (plane, direction) = wall_sketch_plane(params, hole.wall);
    let sketch_id = design.add_sketch(plane);
    let sketch = design
        .sketch_mut(sketch_id)
        .ok_or(ModelError::UnknownSketch(sketch_id.0))?;
    sketch.set_circle_segments(params.circle_segments);
    let [u, v] = hole.center;
    sketch.add_circle_by_center_radius(Point2::new(u, v), hole.radius());
    let profile = sketch.profile(0)?;

    let cut = design.extrude(
        ExtrudeInput::from_profile(profile, params.cut_depth, FeatureOperation::Cut)
            .direction(direction),
    )?;
    debug!(hole = name, feature = %cut.name, wall = ?hole.wall, "cut hole");
    Ok(())
}

fn cut_vents(design: &mut Design, params: &CaseParams) -> Result<(), ModelError> {
    let vents = &params.vents;
    if vents.count == 0 {
        return Ok(());
    }

    let sketch_id = design.add_sketch(ConstructionPlane::xy().offset(-params.clearance));
    let sketch = design
        .sketch_mut(sketch_id)
        .ok_or(ModelError::UnknownSketch(sketch_id.0))?;
    let (half_w, half_l) = (vents.slot_width / 2.0, vents.slot_length / 2.0);
    for x in vents.slot_centers() {
        sketch.add_center_point_rectangle(Point2::new(x, 0.0), Point2::new(x + half_w, half_l));
    }
    let profiles = sketch.profiles()?;

    for profile in &profiles {
        design.add_simple_extrude(profile, params.cut_depth, FeatureOperation::Cut)?;
    }
    debug!(slots = profiles.len(), "cut vent slots");
    Ok(())
}

/// Model the case into `design`.
///
/// Expects the design to hold no bodies the cuts could reach; callers clear
/// it first.
pub fn build_case(design: &mut Design, params: &CaseParams) -> Result<CaseReport, ModelError> {
    let first_entry = design.timeline().len();

    let sketch_id = design.add_sketch(ConstructionPlane::xy());
    let sketch = design
        .sketch_mut(sketch_id)
        .ok_or(ModelError::UnknownSketch(sketch_id.0))?;
    sketch.add_center_point_rectangle(
        Point2::origin(),
        Point2::new(params.width / 2.0, params.height / 2.0),
    );
    let profile = sketch.profile(0)?;

    let extrude = design.add_simple_extrude(&profile, params.depth, FeatureOperation::NewBody)?;
    let body = extrude.bodies[0];
    design.rename_body(body, params.body_name.as_str())?;

    let open = top_faces(design, body)?;
    design.shell(ShellInput::from_faces(&open)?.inside_thickness(params.thickness))?;

    for (name, hole) in params.holes() {
        cut_hole(design, params, name, hole)?;
    }
    cut_vents(design, params)?;

    let body = design.body(body).ok_or(ModelError::UnknownBody(body.0))?;
    let bbox = body.bounding_box();
    let report = CaseReport {
        body: body.id,
        name: body.name.clone(),
        volume: body.volume(),
        triangles: body.mesh.triangle_count(),
        size: bbox.maxs - bbox.mins,
        features: design.timeline().len() - first_entry,
    };
    info!(
        body = %report.name,
        volume = report.volume,
        triangles = report.triangles,
        features = report.features,
        "case built"
    );
    Ok(report)
}
