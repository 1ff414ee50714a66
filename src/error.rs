//! Error types raised while building a simulation.
//!
//! Nothing inside a tick can fail; these only surface from construction,
//! when a tuning value or a level descriptor is structurally invalid.

use thiserror::Error;

/// A tuning value in [`crate::PhysicsConfig`] is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A size has a zero or negative component.
    #[error("{field} must be positive, got {width}x{height}")]
    NonPositiveSize {
        /// Offending field.
        field: &'static str,
        /// Width as given.
        width: i32,
        /// Height as given.
        height: i32,
    },
    /// A fraction lies outside the range it is meaningful in.
    #[error("{field} must lie in {range}, got {value}")]
    FractionOutOfRange {
        /// Offending field.
        field: &'static str,
        /// Accepted range, for the message.
        range: &'static str,
        /// Value as given.
        value: f64,
    },
    /// A scalar is NaN, infinite or negative.
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Value as given.
        value: f64,
    },
}

/// A level descriptor cannot be turned into a playable level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    /// No spawn point was supplied.
    #[error("level has no spawn point")]
    MissingSpawn,
    /// Width or height is not positive.
    #[error("level bounds must have positive size, got {width}x{height}")]
    InvalidBounds {
        /// Level width.
        width: i32,
        /// Level height.
        height: i32,
    },
    /// A collider has zero area.
    #[error("collider {index} has no area")]
    DegenerateCollider {
        /// Position in `colliders`.
        index: usize,
    },
    /// A launcher's interval is empty or starts at zero.
    #[error("launcher (hazard {index}) has invalid spawn interval {min}..={max}")]
    InvalidLauncherInterval {
        /// Position in `hazards`.
        index: usize,
        /// Shortest interval.
        min: u32,
        /// Longest interval.
        max: u32,
    },
    /// A patrol cannot move.
    #[error("patrolling hazard {index} needs a positive range and a non-zero finite speed")]
    InvalidPatrol {
        /// Position in `hazards`.
        index: usize,
    },
    /// A falling spike could never be triggered.
    #[error("falling hazard {index} needs a positive activation radius")]
    InvalidActivationRadius {
        /// Position in `hazards`.
        index: usize,
    },
}

/// Failure while constructing a [`crate::Simulation`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The tuning values were rejected.
    #[error("invalid physics configuration: {0}")]
    Config(#[from] ConfigError),
    /// The level descriptor was rejected.
    #[error("invalid level: {0}")]
    Level(#[from] LevelError),
}
