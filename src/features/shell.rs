//! Hollowing an extruded body into a thin-walled shell

use crate::design::{BRepFace, BodyId, Design, FaceKind, FaceTag, FeatureId, TimelineKind};
use crate::errors::{ModelError, ValidationError};
use crate::features::extrude::sweep_profile;
use crate::float_types::Real;
use crate::traits::CSGOps;
use tracing::info;

/// Parameters of a shell feature: the body, the faces to remove and the
/// wall thickness measured inward from the outer surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellInput {
    pub body: BodyId,
    pub open_faces: Vec<FaceTag>,
    pub inside_thickness: Real,
}

impl ShellInput {
    /// Shell a body, removing `faces`. All faces must come from one body.
    pub fn from_faces(faces: &[BRepFace]) -> Result<Self, ModelError> {
        let Some(first) = faces.first() else {
            return Err(ValidationError::Other("a shell needs at least one face".into()).into());
        };
        if faces.iter().any(|f| f.body != first.body) {
            return Err(ModelError::MixedShellBodies {
                feature: "Shell".into(),
            });
        }
        Ok(ShellInput {
            body: first.body,
            open_faces: faces.iter().map(|f| f.tag).collect(),
            inside_thickness: 0.0,
        })
    }

    /// Hollow a body without opening any face.
    pub const fn closed(body: BodyId) -> Self {
        ShellInput {
            body,
            open_faces: Vec::new(),
            inside_thickness: 0.0,
        }
    }

    pub const fn inside_thickness(mut self, thickness: Real) -> Self {
        self.inside_thickness = thickness;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellFeature {
    pub id: FeatureId,
    pub name: String,
    pub body: BodyId,
}

impl Design {
    /// Apply a shell feature.
    ///
    /// Only bodies that are still a plain extrusion can be shelled, and only
    /// their caps can be opened. The cavity is the profile inset by the wall
    /// thickness, swept between the caps and subtracted from the body.
    pub fn shell(&mut self, input: ShellInput) -> Result<ShellFeature, ModelError> {
        let (id, name) = self.next_feature(TimelineKind::Shell);

        let t = input.inside_thickness;
        if !(t > 0.0 && t.is_finite()) {
            return Err(ValidationError::NonPositiveDimension {
                name: "shell thickness",
                value: t,
            }
            .into());
        }

        let body = self
            .body(input.body)
            .ok_or(ModelError::UnknownBody(input.body.0))?;
        let source = body
            .source
            .clone()
            .ok_or_else(|| ModelError::ShellNeedsExtrusion {
                feature: name.clone(),
                body: body.name.clone(),
            })?;

        let (mut open_start, mut open_end) = (false, false);
        for tag in &input.open_faces {
            match tag.kind {
                FaceKind::StartCap if tag.feature == source.feature => open_start = true,
                FaceKind::EndCap if tag.feature == source.feature => open_end = true,
                _ => {
                    return Err(ModelError::UnsupportedShellFace {
                        feature: name,
                    });
                },
            }
        }

        let length = source.end - source.start;
        let limit = match (open_start, open_end) {
            (false, false) => length / 2.0,
            (true, true) => Real::INFINITY,
            _ => length,
        };
        if t >= limit {
            return Err(ModelError::ShellCollapsed {
                feature: name,
                cause: ValidationError::ShellTooThick {
                    thickness: t,
                    limit,
                },
            });
        }

        let inner_profile = source
            .profile
            .inset(t)
            .map_err(|cause| ModelError::ShellCollapsed {
                feature: name.clone(),
                cause,
            })?;
        let inner_start = if open_start {
            source.start - t
        } else {
            source.start + t
        };
        let inner_end = if open_end {
            source.end + t
        } else {
            source.end - t
        };
        let cavity = sweep_profile(&inner_profile, inner_start, inner_end, id);

        if let Some(body) = self.body_mut(input.body) {
            body.mesh = body.mesh.difference(&cavity);
            body.source = None;
        }
        self.push_timeline(TimelineKind::Shell);
        info!(
            feature = %name,
            body = input.body.0,
            thickness = t,
            open_faces = input.open_faces.len(),
            "shelled"
        );

        Ok(ShellFeature {
            id,
            name,
            body: input.body,
        })
    }
}
