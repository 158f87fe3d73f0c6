//! A trait for any shape which can be represented by triangles
use crate::mesh::{Mesh, vertex::Vertex};
use std::fmt::Debug;

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Call `f` for each triangle.
    ///
    /// The triangle is `[v0, v1, v2]` with positions+normals, wound so
    /// the right-hand normal faces outward.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]);
}

impl<S: Clone + Debug + Send + Sync> Triangulated3D for Mesh<S> {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for poly in &self.polygons {
            for [a, b, c] in poly.triangulate() {
                let n = poly.plane.normal;
                f([
                    Vertex::new(a.pos, n),
                    Vertex::new(b.pos, n),
                    Vertex::new(c.pos, n),
                ]);
            }
        }
    }
}
