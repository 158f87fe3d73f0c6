//! Solid bodies and the faces they expose

use crate::design::FeatureId;
use crate::float_types::{EPSILON, Real, parry3d::bounding_volume::Aabb};
use crate::mesh::Mesh;
use crate::sketch::{Profile, SurfaceType};
use crate::traits::CSGOps;
use nalgebra::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Which part of an extrusion a face came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// Cap on the sketch-side end, facing against the extrude direction.
    StartCap,
    /// Cap on the far end, facing along the extrude direction.
    EndCap,
    /// Wall swept by the given sketch curve.
    Side(usize),
}

/// Metadata carried by every polygon of a body: the feature and face that
/// produced it. Boolean operations preserve it on every fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceTag {
    pub feature: FeatureId,
    pub kind: FaceKind,
    pub surface: SurfaceType,
}

/// How an untouched extruded body was made. Cleared as soon as a boolean
/// feature modifies the body.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionSource {
    pub feature: FeatureId,
    pub profile: Profile,
    /// Extent along the sketch normal, `start < end`.
    pub start: Real,
    pub end: Real,
}

/// A face of a body: all polygons sharing one [`FaceTag`].
#[derive(Debug, Clone, PartialEq)]
pub struct BRepFace {
    pub body: BodyId,
    pub tag: FaceTag,
    pub surface: SurfaceType,
    /// Outward normal when the face is planar.
    pub normal: Option<Vector3<Real>>,
    pub area: Real,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub mesh: Mesh<FaceTag>,
    pub source: Option<ExtrusionSource>,
}

impl Body {
    pub fn volume(&self) -> Real {
        self.mesh.volume()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.mesh.bounding_box()
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.polygons.is_empty()
    }

    /// Faces in the order their first polygon appears.
    pub fn faces(&self) -> Vec<BRepFace> {
        let mut faces: Vec<BRepFace> = Vec::new();
        for poly in &self.mesh.polygons {
            let Some(tag) = poly.metadata else {
                continue;
            };
            let area = poly.area();
            let normal = poly.plane.normal;
            match faces.iter_mut().find(|f| f.tag == tag) {
                Some(face) => {
                    face.area += area;
                    if face
                        .normal
                        .is_some_and(|n| (n - normal).norm() > EPSILON.sqrt())
                    {
                        face.normal = None;
                    }
                },
                None => faces.push(BRepFace {
                    body: self.id,
                    tag,
                    surface: tag.surface,
                    normal: (tag.surface == SurfaceType::Plane).then_some(normal),
                    area,
                }),
            }
        }
        faces
    }
}
