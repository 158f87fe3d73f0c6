//! The modelling document: bodies, sketches and the feature timeline.

use crate::construction::ConstructionPlane;
use crate::errors::ModelError;
use crate::sketch::{Sketch, SketchId};
use tracing::{debug, info};

pub mod body;

pub use body::{BRepFace, Body, BodyId, ExtrusionSource, FaceKind, FaceTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    Sketch,
    Extrude,
    Shell,
}

/// One entry of the feature history, named the way a CAD host would
/// (`Sketch1`, `Extrude3`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub id: FeatureId,
    pub kind: TimelineKind,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Design {
    bodies: Vec<Body>,
    sketches: Vec<Sketch>,
    timeline: Vec<TimelineEntry>,
    body_count: usize,
}

impl Design {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Rename a body.
    pub fn rename_body(&mut self, id: BodyId, name: impl Into<String>) -> Result<(), ModelError> {
        let body = self.body_mut(id).ok_or(ModelError::UnknownBody(id.0))?;
        body.name = name.into();
        Ok(())
    }

    /// Remove a body from the design and hand it back.
    pub fn delete_body(&mut self, id: BodyId) -> Result<Body, ModelError> {
        let index = self
            .bodies
            .iter()
            .position(|b| b.id == id)
            .ok_or(ModelError::UnknownBody(id.0))?;
        let body = self.bodies.remove(index);
        debug!(body = %body.name, "deleted body");
        Ok(body)
    }

    /// Delete every body; sketches and the timeline stay. Returns how many
    /// bodies were removed.
    pub fn clear_bodies(&mut self) -> usize {
        let removed = self.bodies.len();
        self.bodies.clear();
        if removed > 0 {
            info!(removed, "cleared existing bodies");
        }
        removed
    }

    pub fn sketches(&self) -> &[Sketch] {
        &self.sketches
    }

    pub fn sketch(&self, id: SketchId) -> Option<&Sketch> {
        self.sketches.iter().find(|s| s.id == id)
    }

    pub fn sketch_mut(&mut self, id: SketchId) -> Option<&mut Sketch> {
        self.sketches.iter_mut().find(|s| s.id == id)
    }

    /// Start a new, empty sketch on `plane`.
    pub fn add_sketch(&mut self, plane: ConstructionPlane) -> SketchId {
        let id = SketchId(self.sketches.len());
        let entry = self.push_timeline(TimelineKind::Sketch);
        debug!(sketch = %entry, plane = %plane.name, "created sketch");
        self.sketches.push(Sketch::new(id, entry, plane));
        id
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Id and name the next feature of `kind` will get.
    pub(crate) fn next_feature(&self, kind: TimelineKind) -> (FeatureId, String) {
        let ordinal = self.timeline.iter().filter(|e| e.kind == kind).count() + 1;
        let prefix = match kind {
            TimelineKind::Sketch => "Sketch",
            TimelineKind::Extrude => "Extrude",
            TimelineKind::Shell => "Shell",
        };
        (FeatureId(self.timeline.len()), format!("{prefix}{ordinal}"))
    }

    /// Append a feature to the timeline and return its name.
    pub(crate) fn push_timeline(&mut self, kind: TimelineKind) -> String {
        let (id, name) = self.next_feature(kind);
        self.timeline.push(TimelineEntry {
            id,
            kind,
            name: name.clone(),
        });
        name
    }

    /// Insert a freshly built body, named `Body<n>`.
    pub(crate) fn push_body(
        &mut self,
        mesh: crate::mesh::Mesh<FaceTag>,
        source: Option<ExtrusionSource>,
    ) -> BodyId {
        self.body_count += 1;
        let id = BodyId(self.body_count);
        let name = format!("Body{}", self.body_count);
        debug!(body = %name, polygons = mesh.polygons.len(), "created body");
        self.bodies.push(Body {
            id,
            name,
            mesh,
            source,
        });
        id
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut Vec<Body> {
        &mut self.bodies
    }
}
