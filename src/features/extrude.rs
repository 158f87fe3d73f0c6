//! Linear extrusion of sketch profiles

use crate::design::{
    Body, BodyId, Design, ExtrusionSource, FaceKind, FaceTag, FeatureId, TimelineKind,
};
use crate::errors::ModelError;
use crate::features::{ExtentDirection, FeatureOperation};
use crate::float_types::{
    EPSILON, Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::mesh::{Mesh, polygon::Polygon, vertex::Vertex};
use crate::sketch::{Profile, ProfileLoop, SurfaceType};
use crate::traits::CSGOps;
use geo::TriangulateEarcut;
use nalgebra::{Point2, Vector3};
use tracing::{debug, info};

/// Parameters of an extrude feature.
#[derive(Debug, Clone)]
pub struct ExtrudeInput {
    pub profiles: Vec<Profile>,
    pub distance: Real,
    pub direction: ExtentDirection,
    pub operation: FeatureOperation,
}

impl ExtrudeInput {
    /// One-sided extrusion along the sketch normal.
    pub fn new(profiles: Vec<Profile>, distance: Real, operation: FeatureOperation) -> Self {
        ExtrudeInput {
            profiles,
            distance,
            direction: ExtentDirection::Positive,
            operation,
        }
    }

    pub fn from_profile(profile: Profile, distance: Real, operation: FeatureOperation) -> Self {
        Self::new(vec![profile], distance, operation)
    }

    pub const fn direction(mut self, direction: ExtentDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// Result of an extrude feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudeFeature {
    pub id: FeatureId,
    pub name: String,
    pub operation: FeatureOperation,
    /// Bodies created or modified.
    pub bodies: Vec<BodyId>,
    /// Bodies the feature consumed entirely.
    pub removed: Vec<BodyId>,
}

/// Cap polygons of a profile in sketch coordinates, wound counter-clockwise.
fn cap_polygons(profile: &Profile) -> Vec<Vec<Point2<Real>>> {
    if profile.holes.is_empty() && profile.outer.is_convex() {
        return vec![profile.outer.points.clone()];
    }

    profile
        .to_geo()
        .earcut_triangles()
        .into_iter()
        .map(|tri| {
            let [a, b, c] = [tri.v1(), tri.v2(), tri.v3()].map(|p| Point2::new(p.x, p.y));
            let ab = b - a;
            let ac = c - a;
            if ab.x * ac.y - ab.y * ac.x >= 0.0 {
                vec![a, b, c]
            } else {
                vec![a, c, b]
            }
        })
        .collect()
}

fn side_polygons(
    ring: &ProfileLoop,
    profile: &Profile,
    start: Real,
    end: Real,
    feature: FeatureId,
    out: &mut Vec<Polygon<FaceTag>>,
) {
    let plane = &profile.plane;
    let n = ring.points.len();
    for i in 0..n {
        let a = ring.points[i];
        let b = ring.points[(i + 1) % n];
        let tag = FaceTag {
            feature,
            kind: FaceKind::Side(ring.edges[i].curve),
            surface: ring.edges[i].surface,
        };
        let vertices = [
            plane.to_world_at(&a, start),
            plane.to_world_at(&b, start),
            plane.to_world_at(&b, end),
            plane.to_world_at(&a, end),
        ]
        .into_iter()
        .map(|p| Vertex::new(p, Vector3::zeros()))
        .collect();
        let mut poly = Polygon::new(vertices, Some(tag));
        poly.set_new_normal();
        out.push(poly);
    }
}

/// Sweep `profile` between `start` and `end` (measured along its sketch
/// normal, `start < end`) into a closed mesh whose faces are tagged with
/// `feature`.
pub fn sweep_profile(profile: &Profile, start: Real, end: Real, feature: FeatureId) -> Mesh<FaceTag> {
    let plane = &profile.plane;
    let normal = plane.normal();
    let cap_tag = |kind| FaceTag {
        feature,
        kind,
        surface: SurfaceType::Plane,
    };

    let mut polygons = Vec::new();
    for cap in cap_polygons(profile) {
        let top = cap
            .iter()
            .map(|p| Vertex::new(plane.to_world_at(p, end), normal))
            .collect();
        polygons.push(Polygon::new(top, Some(cap_tag(FaceKind::EndCap))));

        let bottom = cap
            .iter()
            .rev()
            .map(|p| Vertex::new(plane.to_world_at(p, start), -normal))
            .collect();
        polygons.push(Polygon::new(bottom, Some(cap_tag(FaceKind::StartCap))));
    }

    side_polygons(&profile.outer, profile, start, end, feature, &mut polygons);
    for hole in &profile.holes {
        side_polygons(hole, profile, start, end, feature, &mut polygons);
    }

    Mesh::from_polygons(&polygons)
}

/// The part of `body` inside `tool`, or `None` when they share no volume.
/// Bodies whose boxes merely overlap the tool's are skipped without a boolean.
fn common_part(body: &Body, tool: &Mesh<FaceTag>, tool_box: &Aabb) -> Option<Mesh<FaceTag>> {
    if body.is_empty() || !body.bounding_box().intersects(tool_box) {
        return None;
    }
    let common = body.mesh.intersection(tool);
    (common.volume() > EPSILON).then_some(common)
}

impl Design {
    /// Extrude one profile along its sketch normal by `distance`.
    pub fn add_simple_extrude(
        &mut self,
        profile: &Profile,
        distance: Real,
        operation: FeatureOperation,
    ) -> Result<ExtrudeFeature, ModelError> {
        self.extrude(ExtrudeInput::from_profile(profile.clone(), distance, operation))
    }

    /// Apply an extrude feature.
    pub fn extrude(&mut self, input: ExtrudeInput) -> Result<ExtrudeFeature, ModelError> {
        let (id, name) = self.next_feature(TimelineKind::Extrude);

        if input.profiles.is_empty() {
            return Err(ModelError::EmptyExtrude { feature: name });
        }
        if !(input.distance > 0.0 && input.distance.is_finite()) {
            return Err(ModelError::InvalidDistance {
                feature: name,
                distance: input.distance,
            });
        }

        let (start, end) = input.direction.span(input.distance);
        let tool = input
            .profiles
            .iter()
            .map(|profile| sweep_profile(profile, start, end, id))
            .reduce(|acc, next| acc.union(&next))
            .unwrap_or_else(Mesh::new);
        let tool_box = tool.bounding_box();

        let mut touched = self
            .bodies()
            .iter()
            .filter_map(|b| common_part(b, &tool, &tool_box).map(|common| (b.id, common)));
        let targets: Vec<(BodyId, Mesh<FaceTag>)> = match input.operation {
            FeatureOperation::NewBody => Vec::new(),
            FeatureOperation::Join => touched.next().into_iter().collect(),
            FeatureOperation::Cut | FeatureOperation::Intersect => touched.collect(),
        };

        let mut feature = ExtrudeFeature {
            id,
            name: name.clone(),
            operation: input.operation,
            bodies: Vec::new(),
            removed: Vec::new(),
        };

        match input.operation {
            FeatureOperation::NewBody => {
                let source = (input.profiles.len() == 1).then(|| ExtrusionSource {
                    feature: id,
                    profile: input.profiles[0].clone(),
                    start,
                    end,
                });
                feature.bodies.push(self.push_body(tool, source));
            },
            FeatureOperation::Join => match targets.first().map(|(id, _)| *id) {
                Some(target) => {
                    if let Some(body) = self.body_mut(target) {
                        body.mesh = body.mesh.union(&tool);
                        body.source = None;
                    }
                    feature.bodies.push(target);
                },
                None => feature.bodies.push(self.push_body(tool, None)),
            },
            FeatureOperation::Cut | FeatureOperation::Intersect => {
                if targets.is_empty() {
                    return Err(ModelError::NoTargetBody { feature: name });
                }
                let cut = input.operation == FeatureOperation::Cut;
                for (target, common) in targets {
                    let Some(body) = self.body_mut(target) else {
                        continue;
                    };
                    body.mesh = if cut {
                        body.mesh.difference(&tool)
                    } else {
                        common
                    };
                    body.source = None;
                    if body.is_empty() {
                        feature.removed.push(target);
                    } else {
                        feature.bodies.push(target);
                    }
                }
                self.bodies_mut()
                    .retain(|b| !feature.removed.contains(&b.id));
            },
        }

        self.push_timeline(TimelineKind::Extrude);
        for removed in &feature.removed {
            debug!(feature = %name, body = removed.0, "body consumed");
        }
        info!(
            feature = %name,
            operation = ?input.operation,
            distance = input.distance,
            profiles = input.profiles.len(),
            bodies = feature.bodies.len(),
            "extruded"
        );
        Ok(feature)
    }
}
