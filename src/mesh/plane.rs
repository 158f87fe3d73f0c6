//! Oriented planes and polygon classification against them

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

// Classification bits, OR-ed together when classifying a whole polygon
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// A plane `normal · p = w` with a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

/// Polygons sorted by [`Plane::split_polygon`]:
/// `(coplanar_front, coplanar_back, front, back)`.
pub type SplitResult<S> = (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>);

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and offset along it.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        Plane {
            normal: normal / len,
            w: w / len,
        }
    }

    /// Create a plane through `point` facing `normal`.
    pub fn from_point_normal(point: &Point3<Real>, normal: Vector3<Real>) -> Self {
        let normal = normal.normalize();
        Plane {
            normal,
            w: normal.dot(&point.coords),
        }
    }

    /// Plane of a planar polygon, oriented by its winding (right-hand rule).
    ///
    /// Newell's method sums the edge cross products, so every vertex
    /// contributes and nearly collinear leading vertices do not matter.
    /// Degenerate input falls back to the +Z plane through the first vertex.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let Some(first) = vertices.first() else {
            return Plane {
                normal: Vector3::z(),
                w: 0.0,
            };
        };

        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for (curr, next) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
            let (a, b) = (curr.pos, next.pos);
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
            centroid += a.coords;
        }
        centroid /= vertices.len() as Real;

        if normal.norm_squared() < Real::EPSILON {
            return Plane {
                normal: Vector3::z(),
                w: first.pos.z,
            };
        }

        let normal = normal.normalize();
        Plane {
            normal,
            w: normal.dot(&centroid),
        }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane (reverse normal and offset)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from the plane, positive in front.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`].
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify a polygon with respect to the plane.
    /// Returns the OR of the classifications of its vertices.
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Splits a polygon by this plane into four buckets:
    /// `(coplanar_front, coplanar_back, front, back)`.
    ///
    /// Spanning polygons are cut along the plane; both halves keep the
    /// original polygon's plane and metadata.
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> SplitResult<S> {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let n = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(n + 1);
                let mut split_back = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let type_i = types[i];
                    let type_j = types[j];
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(vertex_i.clone());
                    }
                    if type_i != FRONT {
                        split_back.push(vertex_i.clone());
                    }

                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let vertex_new = vertex_i.interpolate(vertex_j, t);
                            split_front.push(vertex_new.clone());
                            split_back.push(vertex_new);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(z: Real) -> Polygon<()> {
        Polygon::new(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, z), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, z), Vector3::z()),
                Vertex::new(Point3::new(1.0, 1.0, z), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, z), Vector3::z()),
            ],
            None,
        )
    }

    #[test]
    fn newell_normal_follows_winding() {
        let square = unit_square(2.0);
        assert!((square.plane.normal - Vector3::z()).norm() < 1e-12);
        assert!((square.plane.w - 2.0).abs() < 1e-12);

        let mut flipped = square.clone();
        flipped.flip();
        assert!((flipped.plane.normal + Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn split_spanning_square_in_half() {
        let plane = Plane::from_point_normal(&Point3::new(0.5, 0.0, 0.0), Vector3::x());
        let (cf, cb, front, back) = plane.split_polygon(&unit_square(0.0));
        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        assert!((front[0].area() - 0.5).abs() < 1e-12);
        assert!((back[0].area() - 0.5).abs() < 1e-12);
        assert!(front[0].vertices.iter().all(|v| v.pos.x >= 0.5 - EPSILON));
    }

    #[test]
    fn coplanar_polygons_sorted_by_facing() {
        let plane = Plane::from_point_normal(&Point3::origin(), Vector3::z());
        let (cf, cb, _, _) = plane.split_polygon(&unit_square(0.0));
        assert_eq!((cf.len(), cb.len()), (1, 0));

        let mut down = unit_square(0.0);
        down.flip();
        let (cf, cb, _, _) = plane.split_polygon(&down);
        assert_eq!((cf.len(), cb.len()), (0, 1));
    }
}
