//! Validation and modelling errors

use crate::float_types::Real;
use nalgebra::Point3;

/// Geometry or parameter issues detected before a feature touches a body
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A dimension that must be strictly positive is not
    #[error("(NonPositiveDimension) {name} must be > 0, got {value}")]
    NonPositiveDimension { name: &'static str, value: Real },
    /// A coordinate is NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// A ring or curve has fewer than the minimal number of points
    #[error("(TooFewPoints) A loop needs at least 3 distinct points, found {0}")]
    TooFewPoints(usize),
    /// Two sketch loops cross each other
    #[error("(CrossingCurves) Loops starting at curves {first} and {second} cross")]
    CrossingCurves { first: usize, second: usize },
    /// More than two lines meet at one sketch point
    #[error("(BranchingCurves) {degree} lines meet at ({x}, {y})")]
    BranchingCurves { x: Real, y: Real, degree: usize },
    /// The shell wall is too thick for the body it hollows
    #[error("(ShellTooThick) thickness {thickness} must be < {limit}")]
    ShellTooThick { thickness: Real, limit: Real },
    /// An inward offset consumed the whole region
    #[error("(OffsetCollapsed) insetting by {distance} leaves no material")]
    OffsetCollapsed { distance: Real },
    /// A feature hole does not fit inside the wall it is cut through
    #[error("(HoleOutsideWall) {name} hole of diameter {diameter} does not fit on its wall")]
    HoleOutsideWall { name: &'static str, diameter: Real },
    /// Two holes on the same wall overlap
    #[error("(HolesOverlap) {first} and {second} holes overlap")]
    HolesOverlap { first: &'static str, second: &'static str },
    /// The vent slot row does not fit on the floor, or slots overlap
    #[error("(VentsOutsideFloor) {0}")]
    VentsOutsideFloor(String),
    /// In general, anything else
    #[error("{0}")]
    Other(String),
}

/// Failures applying sketches and features to a [`Design`](crate::design::Design)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("no sketch with id {0}")]
    UnknownSketch(usize),
    #[error("no body with id {0}")]
    UnknownBody(usize),
    #[error("sketch {sketch} contains no closed profile")]
    NoProfiles { sketch: String },
    #[error("{feature}: no profiles selected to extrude")]
    EmptyExtrude { feature: String },
    #[error("profile index {index} is out of range ({len} profiles)")]
    ProfileIndex { index: usize, len: usize },
    #[error("{feature}: extent distance must be > 0, got {distance}")]
    InvalidDistance { feature: String, distance: Real },
    #[error("{feature}: no target body found to cut or intersect")]
    NoTargetBody { feature: String },
    #[error("{feature}: shell faces must all belong to one body")]
    MixedShellBodies { feature: String },
    #[error("{feature}: body {body} is not an untouched extrusion and cannot be shelled")]
    ShellNeedsExtrusion { feature: String, body: String },
    #[error("{feature}: only the end caps of the extruded body can be removed")]
    UnsupportedShellFace { feature: String },
    #[error("{feature}: failed to compute the inner wall")]
    ShellCollapsed {
        feature: String,
        #[source]
        cause: ValidationError,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
