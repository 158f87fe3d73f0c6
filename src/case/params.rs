//! Enclosure parameters, their defaults and geometric validation

use crate::errors::ValidationError;
use crate::float_types::Real;
use crate::io::IoError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A side wall of the case, named by its outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    PosX,
    NegX,
    PosY,
    NegY,
}

impl Wall {
    /// Walls facing along X run along model Y.
    pub const fn faces_x(self) -> bool {
        matches!(self, Wall::PosX | Wall::NegX)
    }
}

/// A round hole through a side wall.
///
/// `center[0]` runs horizontally along the wall (model Y on the X walls,
/// model X on the Y walls), `center[1]` is the height above the bottom face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    pub diameter: Real,
    pub wall: Wall,
    pub center: [Real; 2],
}

impl HoleSpec {
    pub const fn new(diameter: Real, wall: Wall, u: Real, v: Real) -> Self {
        HoleSpec {
            diameter,
            wall,
            center: [u, v],
        }
    }

    pub fn radius(&self) -> Real {
        self.diameter / 2.0
    }
}

/// A row of rectangular slots through the floor, centred on the case and
/// spaced along X.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VentSpec {
    pub count: usize,
    /// Slot size along X.
    pub slot_width: Real,
    /// Slot size along Y.
    pub slot_length: Real,
    pub pitch: Real,
}

impl Default for VentSpec {
    fn default() -> Self {
        VentSpec {
            count: 10,
            slot_width: 1.0,
            slot_length: 30.0,
            pitch: 9.0,
        }
    }
}

impl VentSpec {
    /// X coordinate of each slot centre.
    pub fn slot_centers(&self) -> Vec<Real> {
        let mid = (self.count as Real - 1.0) / 2.0;
        (0..self.count)
            .map(|i| (i as Real - mid) * self.pitch)
            .collect()
    }

    /// Overall X extent of the row.
    pub fn span(&self) -> Real {
        match self.count {
            0 => 0.0,
            n => (n - 1) as Real * self.pitch + self.slot_width,
        }
    }
}

/// Every dimension of the enclosure, in millimetres.
///
/// The case is centred on the origin in X and Y and rests on `z = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseParams {
    /// Outer size along X.
    pub width: Real,
    /// Outer size along Y.
    pub height: Real,
    /// Outer size along Z.
    pub depth: Real,
    /// Wall and floor thickness.
    pub thickness: Real,
    pub speaker: HoleSpec,
    pub button: HoleSpec,
    pub potentiometer: HoleSpec,
    pub vents: VentSpec,
    /// Length of every cutting extrusion.
    pub cut_depth: Real,
    /// Gap between a cut's sketch plane and the face it cuts into.
    pub clearance: Real,
    pub circle_segments: usize,
    pub body_name: String,
}

impl Default for CaseParams {
    fn default() -> Self {
        CaseParams {
            width: 90.0,
            height: 59.0,
            depth: 50.0,
            thickness: 3.0,
            speaker: HoleSpec::new(40.0, Wall::PosX, 0.0, 25.0),
            button: HoleSpec::new(22.0, Wall::NegX, 0.0, 20.0),
            potentiometer: HoleSpec::new(8.0, Wall::NegX, 0.0, 38.0),
            vents: VentSpec::default(),
            cut_depth: 5.0,
            clearance: 1.0,
            circle_segments: crate::sketch::DEFAULT_CIRCLE_SEGMENTS,
            body_name: "ESM_Case".to_string(),
        }
    }
}

fn positive(name: &'static str, value: Real) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveDimension { name, value })
    }
}

impl CaseParams {
    pub fn from_ron_str(text: &str) -> Result<Self, IoError> {
        Ok(ron::from_str(text)?)
    }

    /// Read parameters from a RON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String, IoError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// The holes with the names used in error messages.
    pub fn holes(&self) -> [(&'static str, &HoleSpec); 3] {
        [
            ("speaker", &self.speaker),
            ("button", &self.button),
            ("potentiometer", &self.potentiometer),
        ]
    }

    /// Half the inner span of `wall`, measured from its centre line.
    fn inner_half_span(&self, wall: Wall) -> Real {
        let outer = if wall.faces_x() { self.height } else { self.width };
        outer / 2.0 - self.thickness
    }

    /// Check that the parameters describe a buildable case.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("depth", self.depth)?;
        positive("thickness", self.thickness)?;
        positive("cut depth", self.cut_depth)?;
        positive("clearance", self.clearance)?;
        if self.circle_segments < 3 {
            return Err(ValidationError::Other(format!(
                "circles need at least 3 segments, got {}",
                self.circle_segments
            )));
        }

        let limit = (self.width.min(self.height) / 2.0).min(self.depth);
        if self.thickness >= limit {
            return Err(ValidationError::ShellTooThick {
                thickness: self.thickness,
                limit,
            });
        }
        if self.cut_depth <= self.clearance + self.thickness {
            return Err(ValidationError::Other(format!(
                "cut depth {} does not reach through clearance {} and wall {}",
                self.cut_depth, self.clearance, self.thickness
            )));
        }

        let holes = self.holes();
        for (name, hole) in holes {
            positive("hole diameter", hole.diameter)?;
            let r = hole.radius();
            let [u, v] = hole.center;
            let fits = u.abs() + r <= self.inner_half_span(hole.wall)
                && v - r >= self.thickness
                && v + r <= self.depth;
            if !fits {
                return Err(ValidationError::HoleOutsideWall {
                    name,
                    diameter: hole.diameter,
                });
            }
        }
        for (i, (first, a)) in holes.iter().enumerate() {
            for (second, b) in &holes[i + 1..] {
                let du = a.center[0] - b.center[0];
                let dv = a.center[1] - b.center[1];
                if a.wall == b.wall && du.hypot(dv) < a.radius() + b.radius() {
                    return Err(ValidationError::HolesOverlap {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }

        self.validate_vents()
    }

    fn validate_vents(&self) -> Result<(), ValidationError> {
        let vents = &self.vents;
        if vents.count == 0 {
            return Ok(());
        }
        positive("slot width", vents.slot_width)?;
        positive("slot length", vents.slot_length)?;
        if vents.count > 1 {
            positive("vent pitch", vents.pitch)?;
        }
        if vents.count > 1 && vents.pitch <= vents.slot_width {
            return Err(ValidationError::VentsOutsideFloor(format!(
                "pitch {} must exceed slot width {}",
                vents.pitch, vents.slot_width
            )));
        }
        let inner_x = self.width - 2.0 * self.thickness;
        if vents.span() > inner_x {
            return Err(ValidationError::VentsOutsideFloor(format!(
                "{} slots span {} mm but the floor is {inner_x} mm wide",
                vents.count,
                vents.span()
            )));
        }
        let inner_y = self.height - 2.0 * self.thickness;
        if vents.slot_length > inner_y {
            return Err(ValidationError::VentsOutsideFloor(format!(
                "slot length {} exceeds the floor depth {inner_y} mm",
                vents.slot_length
            )));
        }
        Ok(())
    }
}
