//! Sketches: curves drawn on a construction plane, and the closed profiles
//! they bound.

use crate::construction::ConstructionPlane;
use crate::errors::{ModelError, ValidationError};
use crate::float_types::Real;
use nalgebra::Point2;
use tracing::debug;

pub mod profile;

pub use profile::{EdgeSource, Profile, ProfileLoop, SurfaceType};

/// Default number of straight segments a circle is tessellated into.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SketchId(pub usize);

/// A curve authored on a sketch, in sketch coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchCurve {
    Line { start: Point2<Real>, end: Point2<Real> },
    Circle { center: Point2<Real>, radius: Real },
}

#[derive(Debug, Clone)]
pub struct Sketch {
    pub id: SketchId,
    pub name: String,
    pub plane: ConstructionPlane,
    curves: Vec<SketchCurve>,
    circle_segments: usize,
}

impl Sketch {
    pub fn new(id: SketchId, name: impl Into<String>, plane: ConstructionPlane) -> Self {
        Sketch {
            id,
            name: name.into(),
            plane,
            curves: Vec::new(),
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }

    pub fn curves(&self) -> &[SketchCurve] {
        &self.curves
    }

    pub const fn circle_segments(&self) -> usize {
        self.circle_segments
    }

    /// Resolution used when circles are turned into profiles (at least 3).
    pub fn set_circle_segments(&mut self, segments: usize) {
        self.circle_segments = segments.max(3);
    }

    /// Add a line segment and return its curve index.
    pub fn add_line(&mut self, start: Point2<Real>, end: Point2<Real>) -> usize {
        self.curves.push(SketchCurve::Line { start, end });
        self.curves.len() - 1
    }

    /// Axis-aligned rectangle centred on `center` with one corner at `corner`.
    /// Returns the indices of its four lines.
    pub fn add_center_point_rectangle(
        &mut self,
        center: Point2<Real>,
        corner: Point2<Real>,
    ) -> [usize; 4] {
        let dx = (corner.x - center.x).abs();
        let dy = (corner.y - center.y).abs();
        self.add_corners(
            Point2::new(center.x - dx, center.y - dy),
            Point2::new(center.x + dx, center.y + dy),
        )
    }

    /// Axis-aligned rectangle spanned by two opposite corners.
    /// Returns the indices of its four lines.
    pub fn add_two_point_rectangle(&mut self, a: Point2<Real>, b: Point2<Real>) -> [usize; 4] {
        self.add_corners(a.inf(&b), a.sup(&b))
    }

    fn add_corners(&mut self, min: Point2<Real>, max: Point2<Real>) -> [usize; 4] {
        let corners = [
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ];
        [0, 1, 2, 3].map(|i| self.add_line(corners[i], corners[(i + 1) % 4]))
    }

    /// Add a circle and return its curve index.
    pub fn add_circle_by_center_radius(&mut self, center: Point2<Real>, radius: Real) -> usize {
        self.curves.push(SketchCurve::Circle { center, radius });
        self.curves.len() - 1
    }

    /// Every closed region bounded by this sketch's curves, in curve
    /// creation order.
    pub fn profiles(&self) -> Result<Vec<Profile>, ValidationError> {
        let profiles = profile::extract_profiles(self)?;
        debug!(
            sketch = %self.name,
            curves = self.curves.len(),
            profiles = profiles.len(),
            "extracted profiles"
        );
        Ok(profiles)
    }

    /// The `index`-th profile of this sketch.
    pub fn profile(&self, index: usize) -> Result<Profile, ModelError> {
        let mut profiles = self.profiles()?;
        if profiles.is_empty() {
            return Err(ModelError::NoProfiles {
                sketch: self.name.clone(),
            });
        }
        let len = profiles.len();
        if index >= len {
            return Err(ModelError::ProfileIndex { index, len });
        }
        Ok(profiles.swap_remove(index))
    }
}
