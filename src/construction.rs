//! Construction planes: the 2D frames sketches are drawn on

use crate::float_types::Real;
use nalgebra::{Point2, Point3, Vector3};

/// A sketch frame: origin plus two orthonormal in-plane axes.
///
/// The plane normal is `x_axis × y_axis`; extrusions measure their extent
/// along it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionPlane {
    pub name: String,
    pub origin: Point3<Real>,
    pub x_axis: Vector3<Real>,
    pub y_axis: Vector3<Real>,
}

impl ConstructionPlane {
    /// XY plane: sketch x = model X, sketch y = model Y, normal +Z.
    pub fn xy() -> Self {
        Self::new("XY", Point3::origin(), Vector3::x(), Vector3::y())
    }

    /// YZ plane: sketch x = model Y, sketch y = model Z, normal +X.
    pub fn yz() -> Self {
        Self::new("YZ", Point3::origin(), Vector3::y(), Vector3::z())
    }

    /// XZ plane: sketch x = model X, sketch y = model Z, normal -Y.
    pub fn xz() -> Self {
        Self::new("XZ", Point3::origin(), Vector3::x(), Vector3::z())
    }

    pub fn new(
        name: impl Into<String>,
        origin: Point3<Real>,
        x_axis: Vector3<Real>,
        y_axis: Vector3<Real>,
    ) -> Self {
        ConstructionPlane {
            name: name.into(),
            origin,
            x_axis: x_axis.normalize(),
            y_axis: y_axis.normalize(),
        }
    }

    pub fn normal(&self) -> Vector3<Real> {
        self.x_axis.cross(&self.y_axis)
    }

    /// A parallel plane moved `distance` along the normal.
    pub fn offset(&self, distance: Real) -> Self {
        ConstructionPlane {
            name: format!("{} offset {distance}", self.name),
            origin: self.origin + self.normal() * distance,
            x_axis: self.x_axis,
            y_axis: self.y_axis,
        }
    }

    /// Map a sketch point into model space.
    pub fn to_world(&self, p: &Point2<Real>) -> Point3<Real> {
        self.origin + self.x_axis * p.x + self.y_axis * p.y
    }

    /// Map a sketch point into model space, lifted `height` along the normal.
    pub fn to_world_at(&self, p: &Point2<Real>, height: Real) -> Point3<Real> {
        self.to_world(p) + self.normal() * height
    }
}
