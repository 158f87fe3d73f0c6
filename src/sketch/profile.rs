//! Closed sketch regions and their extraction from curves

use crate::construction::ConstructionPlane;
use crate::errors::ValidationError;
use crate::float_types::{EPSILON, Real, TAU};
use crate::sketch::{Sketch, SketchCurve, SketchId};
use geo::{
    Area, Centroid, Contains, Coord, Intersects, LineString, Point as GeoPoint,
    Polygon as GeoPolygon,
};
use nalgebra::{Point2, Point3, Vector2};

/// Kind of surface an extruded profile edge sweeps out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    Plane,
    Cylinder,
}

/// The sketch curve a profile edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSource {
    pub curve: usize,
    pub surface: SurfaceType,
}

/// A closed polyline; edge `i` runs from `points[i]` to `points[i + 1]`
/// (wrapping) and came from `edges[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLoop {
    pub points: Vec<Point2<Real>>,
    pub edges: Vec<EdgeSource>,
}

impl ProfileLoop {
    /// Shoelace area, positive for counter-clockwise loops.
    pub fn signed_area(&self) -> Real {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum::<Real>()
            * 0.5
    }

    /// Same loop walked the other way; edge sources stay attached to
    /// their segments.
    pub fn reversed(&self) -> ProfileLoop {
        let n = self.points.len();
        let points = self.points.iter().rev().copied().collect();
        let edges = (0..n).map(|k| self.edges[(2 * n - 2 - k) % n]).collect();
        ProfileLoop { points, edges }
    }

    fn oriented(self, counter_clockwise: bool) -> ProfileLoop {
        if (self.signed_area() > 0.0) == counter_clockwise {
            self
        } else {
            self.reversed()
        }
    }

    /// True when no interior angle exceeds 180° (for a CCW loop).
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        (0..n).all(|i| {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let c = self.points[(i + 2) % n];
            let ab = b - a;
            let bc = c - b;
            ab.x * bc.y - ab.y * bc.x >= -EPSILON
        })
    }

    pub fn to_line_string(&self) -> LineString<Real> {
        let mut coords: Vec<Coord<Real>> =
            self.points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
        LineString::new(coords)
    }

    /// Move every edge `distance` to its left, joining neighbours with
    /// mitred corners. For a CCW outer loop that shrinks the region; for a
    /// CW hole it grows the hole.
    fn offset_left(&self, distance: Real) -> ProfileLoop {
        let n = self.points.len();
        let left = |d: Vector2<Real>| Vector2::new(-d.y, d.x);
        let points = (0..n)
            .map(|i| {
                let prev = self.points[(i + n - 1) % n];
                let curr = self.points[i];
                let next = self.points[(i + 1) % n];
                let n1 = left((curr - prev).normalize());
                let n2 = left((next - curr).normalize());
                let bisector = n1 + n2;
                if bisector.norm() < EPSILON {
                    return curr + n1 * distance;
                }
                let miter = bisector.normalize();
                // cap the miter on needle-sharp corners
                let cos = miter.dot(&n1).max(0.1);
                curr + miter * (distance / cos)
            })
            .collect();
        ProfileLoop {
            points,
            edges: self.edges.clone(),
        }
    }

    /// True when every edge kept its direction after an offset.
    fn same_edge_directions(&self, other: &ProfileLoop) -> bool {
        let n = self.points.len();
        (0..n).all(|i| {
            let before = self.points[(i + 1) % n] - self.points[i];
            let after = other.points[(i + 1) % n] - other.points[i];
            before.dot(&after) > 0.0
        })
    }
}

/// A closed region of a sketch: one outer loop (counter-clockwise) minus
/// zero or more holes (clockwise), in sketch coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub sketch: SketchId,
    pub plane: ConstructionPlane,
    pub outer: ProfileLoop,
    pub holes: Vec<ProfileLoop>,
}

impl Profile {
    pub fn to_geo(&self) -> GeoPolygon<Real> {
        GeoPolygon::new(
            self.outer.to_line_string(),
            self.holes.iter().map(ProfileLoop::to_line_string).collect(),
        )
    }

    /// Region area, holes excluded.
    pub fn area(&self) -> Real {
        self.to_geo().unsigned_area()
    }

    /// Area centroid in sketch coordinates.
    pub fn centroid(&self) -> Option<Point2<Real>> {
        self.to_geo().centroid().map(|c| Point2::new(c.x(), c.y()))
    }

    /// Area centroid in model coordinates.
    pub fn world_centroid(&self) -> Option<Point3<Real>> {
        self.centroid().map(|c| self.plane.to_world(&c))
    }

    /// The region shrunk by `distance` on every edge (holes grow).
    ///
    /// Fails with [`ValidationError::OffsetCollapsed`] when the wall would
    /// consume the region or a grown hole would break through.
    pub fn inset(&self, distance: Real) -> Result<Profile, ValidationError> {
        if distance <= 0.0 || !distance.is_finite() {
            return Err(ValidationError::NonPositiveDimension {
                name: "inset distance",
                value: distance,
            });
        }
        let collapsed = ValidationError::OffsetCollapsed { distance };

        let outer = self.outer.offset_left(distance);
        if !self.outer.same_edge_directions(&outer) || outer.signed_area() <= EPSILON {
            return Err(collapsed);
        }

        let holes: Vec<ProfileLoop> = self
            .holes
            .iter()
            .map(|hole| hole.offset_left(distance))
            .collect();

        let outer_region = GeoPolygon::new(outer.to_line_string(), vec![]);
        for (i, hole) in holes.iter().enumerate() {
            let hole_region = GeoPolygon::new(hole.to_line_string(), vec![]);
            if !outer_region.contains(&hole_region) {
                return Err(collapsed);
            }
            if holes[..i]
                .iter()
                .any(|other| other.to_line_string().intersects(&hole.to_line_string()))
            {
                return Err(collapsed);
            }
        }

        Ok(Profile {
            sketch: self.sketch,
            plane: self.plane.clone(),
            outer,
            holes,
        })
    }
}

/// A closed loop found in the sketch, tagged with the lowest curve index
/// it uses so profiles come out in authoring order.
struct RawLoop {
    first_curve: usize,
    ring: ProfileLoop,
}

fn check_point(sketch: &Sketch, p: &Point2<Real>) -> Result<(), ValidationError> {
    if p.x.is_finite() && p.y.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidCoordinate(sketch.plane.to_world(p)))
    }
}

fn circle_loop(
    index: usize,
    center: Point2<Real>,
    radius: Real,
    segments: usize,
) -> Result<RawLoop, ValidationError> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(ValidationError::NonPositiveDimension {
            name: "circle radius",
            value: radius,
        });
    }
    let points = (0..segments)
        .map(|k| {
            let theta = TAU * k as Real / segments as Real;
            Point2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
        })
        .collect();
    let source = EdgeSource {
        curve: index,
        surface: SurfaceType::Cylinder,
    };
    Ok(RawLoop {
        first_curve: index,
        ring: ProfileLoop {
            points,
            edges: vec![source; segments],
        },
    })
}

/// Join line segments end to end into closed loops.
///
/// Endpoints closer than `EPSILON` are merged. Chains that dead-end are
/// open and contribute nothing; a point shared by more than two lines is
/// rejected.
fn line_loops(sketch: &Sketch) -> Result<Vec<RawLoop>, ValidationError> {
    struct Segment {
        curve: usize,
        ends: [usize; 2],
    }

    let mut nodes: Vec<Point2<Real>> = Vec::new();
    let mut node_for = |p: Point2<Real>| -> usize {
        match nodes.iter().position(|q| (q - p).norm() < EPSILON) {
            Some(i) => i,
            None => {
                nodes.push(p);
                nodes.len() - 1
            },
        }
    };

    let mut segments = Vec::new();
    for (curve, c) in sketch.curves().iter().enumerate() {
        if let SketchCurve::Line { start, end } = c {
            let a = node_for(*start);
            let b = node_for(*end);
            if a == b {
                tracing::warn!(sketch = %sketch.name, curve, "skipping zero-length line");
                continue;
            }
            segments.push(Segment { curve, ends: [a, b] });
        }
    }

    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (s, seg) in segments.iter().enumerate() {
        incident[seg.ends[0]].push(s);
        incident[seg.ends[1]].push(s);
    }
    if let Some((node, list)) = incident.iter().enumerate().find(|(_, l)| l.len() > 2) {
        return Err(ValidationError::BranchingCurves {
            x: nodes[node].x,
            y: nodes[node].y,
            degree: list.len(),
        });
    }

    let source = |curve| EdgeSource {
        curve,
        surface: SurfaceType::Plane,
    };
    let mut visited = vec![false; segments.len()];
    let mut loops = Vec::new();

    for start_seg in 0..segments.len() {
        if visited[start_seg] {
            continue;
        }
        let start_node = segments[start_seg].ends[0];
        let mut points = vec![nodes[start_node]];
        let mut edges = vec![source(segments[start_seg].curve)];
        let mut first_curve = segments[start_seg].curve;
        let mut seg = start_seg;
        let mut node = segments[seg].ends[1];
        visited[seg] = true;

        let closed = loop {
            if node == start_node {
                break true;
            }
            let Some(&next) = incident[node].iter().find(|&&s| s != seg) else {
                break false;
            };
            if visited[next] {
                break false;
            }
            visited[next] = true;
            points.push(nodes[node]);
            edges.push(source(segments[next].curve));
            first_curve = first_curve.min(segments[next].curve);
            let ends = segments[next].ends;
            node = if ends[0] == node { ends[1] } else { ends[0] };
            seg = next;
        };

        if !closed {
            continue;
        }
        if points.len() < 3 {
            return Err(ValidationError::TooFewPoints(points.len()));
        }
        loops.push(RawLoop {
            first_curve,
            ring: ProfileLoop { points, edges },
        });
    }

    Ok(loops)
}

/// Turn a sketch's curves into profiles.
pub(crate) fn extract_profiles(sketch: &Sketch) -> Result<Vec<Profile>, ValidationError> {
    for curve in sketch.curves() {
        match curve {
            SketchCurve::Line { start, end } => {
                check_point(sketch, start)?;
                check_point(sketch, end)?;
            },
            SketchCurve::Circle { center, .. } => check_point(sketch, center)?,
        }
    }

    let mut loops = line_loops(sketch)?;
    for (index, curve) in sketch.curves().iter().enumerate() {
        if let SketchCurve::Circle { center, radius } = curve {
            loops.push(circle_loop(index, *center, *radius, sketch.circle_segments())?);
        }
    }
    loops.sort_by_key(|l| l.first_curve);

    let mut rings = Vec::with_capacity(loops.len());
    for raw in loops {
        if raw.ring.signed_area().abs() <= EPSILON {
            return Err(ValidationError::Other(format!(
                "loop starting at curve {} encloses no area",
                raw.first_curve
            )));
        }
        rings.push((raw.first_curve, raw.ring.oriented(true)));
    }

    let outlines: Vec<LineString<Real>> = rings.iter().map(|(_, r)| r.to_line_string()).collect();
    for i in 0..rings.len() {
        for j in (i + 1)..rings.len() {
            if outlines[i].intersects(&outlines[j]) {
                return Err(ValidationError::CrossingCurves {
                    first: rings[i].0,
                    second: rings[j].0,
                });
            }
        }
    }

    // innermost loop strictly containing each loop
    let regions: Vec<GeoPolygon<Real>> = outlines
        .iter()
        .map(|ls| GeoPolygon::new(ls.clone(), vec![]))
        .collect();
    let areas: Vec<Real> = rings.iter().map(|(_, r)| r.signed_area()).collect();
    let parents: Vec<Option<usize>> = (0..rings.len())
        .map(|j| {
            let sample = rings[j].1.points[0];
            let sample = GeoPoint::new(sample.x, sample.y);
            (0..rings.len())
                .filter(|&i| i != j && regions[i].contains(&sample))
                .min_by(|&a, &b| areas[a].total_cmp(&areas[b]))
        })
        .collect();

    let profiles = (0..rings.len())
        .map(|i| Profile {
            sketch: sketch.id,
            plane: sketch.plane.clone(),
            outer: rings[i].1.clone(),
            holes: (0..rings.len())
                .filter(|&j| parents[j] == Some(i))
                .map(|j| rings[j].1.clone().oriented(false))
                .collect(),
        })
        .collect();

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_loop() -> ProfileLoop {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let edges = (0..4)
            .map(|curve| EdgeSource {
                curve,
                surface: SurfaceType::Plane,
            })
            .collect();
        ProfileLoop { points, edges }
    }

    #[test]
    fn reversing_keeps_edges_on_their_segments() {
        let ring = square_loop();
        let rev = ring.reversed();
        assert!(rev.signed_area() < 0.0);
        // reversed edge k joins rev.points[k] and rev.points[k + 1]; it must be
        // the segment that originally joined the same two points
        for k in 0..4 {
            let a = rev.points[k];
            let b = rev.points[(k + 1) % 4];
            let src = rev.edges[k].curve;
            let (p, q) = (ring.points[src], ring.points[(src + 1) % 4]);
            assert!((a == q && b == p) || (a == p && b == q));
        }
    }

    #[test]
    fn square_is_convex_and_offsets_inward() {
        let ring = square_loop();
        assert!(ring.is_convex());
        let inner = ring.offset_left(0.5);
        assert!((inner.signed_area() - 1.0).abs() < 1e-9);
        assert!(ring.same_edge_directions(&inner));
        let collapsed = ring.offset_left(1.5);
        assert!(!ring.same_edge_directions(&collapsed));
    }
}
