//! Convex planar polygons, the faces a [`Mesh`](crate::mesh::Mesh) is made of

use crate::float_types::{
    Real,
    parry3d::bounding_volume::Aabb,
};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// A convex, planar polygon with optional per-face metadata.
///
/// Splitting a polygon keeps its plane and metadata, so metadata travels
/// with every fragment through boolean operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Polygon<S> {
    /// Create a polygon, computing its plane from the vertex winding.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        debug_assert!(vertices.len() >= 3, "degenerate polygon");
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Create a polygon on a known plane (used for split fragments).
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            metadata,
        }
    }

    /// Reverse winding, vertex normals and plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Recompute the plane from the vertices and write its normal into
    /// every vertex.
    pub fn set_new_normal(&mut self) {
        self.plane = Plane::from_vertices(&self.vertices);
        for v in &mut self.vertices {
            v.normal = self.plane.normal;
        }
    }

    /// Fan triangulation. Polygons are convex so the fan is valid.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let Some(anchor) = self.vertices.first() else {
            return Vec::new();
        };
        self.vertices
            .windows(2)
            .skip(1)
            .map(|pair| [anchor.clone(), pair[0].clone(), pair[1].clone()])
            .collect()
    }

    /// Surface area.
    pub fn area(&self) -> Real {
        let mut sum = Vector3::zeros();
        for (curr, next) in self.vertices.iter().zip(self.vertices.iter().cycle().skip(1)) {
            sum += curr.pos.coords.cross(&next.pos.coords);
        }
        0.5 * sum.dot(&self.plane.normal).abs()
    }

    /// Signed volume of the cone from the origin to this face. Summed over a
    /// closed mesh this is the enclosed volume.
    pub fn signed_volume(&self) -> Real {
        self.triangulate()
            .iter()
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)) / 6.0)
            .sum()
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins = mins.inf(&v.pos);
            maxs = maxs.sup(&v.pos);
        }
        Aabb::new(mins, maxs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_triangulation_of_pentagon() {
        let vertices = (0..5)
            .map(|i| {
                let a = i as Real * crate::float_types::TAU / 5.0;
                Vertex::new(Point3::new(a.cos(), a.sin(), 0.0), Vector3::z())
            })
            .collect();
        let poly: Polygon<()> = Polygon::new(vertices, None);
        let tris = poly.triangulate();
        assert_eq!(tris.len(), 3);
        let tri_area: Real = tris
            .iter()
            .map(|[a, b, c]| 0.5 * (b.pos - a.pos).cross(&(c.pos - a.pos)).norm())
            .sum();
        assert!((tri_area - poly.area()).abs() < 1e-12);
    }

    #[test]
    fn flip_keeps_metadata() {
        let mut poly = Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
            ],
            Some("cap"),
        );
        poly.flip();
        assert_eq!(poly.metadata, Some("cap"));
        assert_eq!(poly.vertices[0].normal, -Vector3::z());
        assert!(poly.plane.normal.z < 0.0);
    }
}
