//! Solid features applied to a [`Design`](crate::design::Design)

pub mod extrude;
pub mod shell;

pub use extrude::{ExtrudeFeature, ExtrudeInput, sweep_profile};
pub use shell::{ShellFeature, ShellInput};

use crate::float_types::Real;

/// What an extrusion does with the solid it sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureOperation {
    /// Add a separate body.
    NewBody,
    /// Merge into the first body the tool touches.
    Join,
    /// Remove material from every body the tool touches.
    Cut,
    /// Keep only the material shared with the tool.
    Intersect,
}

/// Which way an extrusion runs from its sketch plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtentDirection {
    /// Along the sketch normal.
    #[default]
    Positive,
    /// Against the sketch normal.
    Negative,
    /// Half the distance each way.
    Symmetric,
}

impl ExtentDirection {
    /// `(start, end)` along the sketch normal for an extent of `distance`.
    pub fn span(self, distance: Real) -> (Real, Real) {
        match self {
            ExtentDirection::Positive => (0.0, distance),
            ExtentDirection::Negative => (-distance, 0.0),
            ExtentDirection::Symmetric => (-distance / 2.0, distance / 2.0),
        }
    }
}
