//! Simulation core for a tile-based platformer with switchable gravity.
//!
//! The crate owns the per-tick rules: swept collision against static level
//! geometry, the player controller, spike and projectile hazards, and the
//! gravity flip state machine. Hosts feed one [`InputIntent`] per tick into
//! [`Simulation::step`] and render from the views it exposes.
mod macros;

pub mod arena;
pub mod body;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod gravity;
pub mod hazards;
pub mod input;
pub mod level;
pub mod logging;
pub mod numeric;
pub mod player;
pub mod resolver;
pub mod simulation;
pub mod world;

// Re-export commonly used items
pub use body::{KinematicBody, WallContact};
pub use config::PhysicsConfig;
pub use error::{ConfigError, LevelError, SimulationError};
pub use geometry::{Aabb, Orientation, PixelMask};
pub use gravity::{GravityDirection, GravityPhase, GravityState};
pub use hazards::{HazardDescriptor, HazardPlacement};
pub use input::InputIntent;
pub use level::{ColliderPlacement, LevelDescriptor};
pub use logging::init as init_logging;
pub use player::Player;
pub use resolver::{move_and_collide, resolve_axis, Axis, AxisOutcome};
pub use simulation::{
    BodyView, DeathCause, GravityView, HazardView, SimEvent, Simulation, SimulationStatus,
};
pub use world::{CollisionWorld, PlatformStyle, SurfaceTag};

pub mod prelude {
    //! Everything a host needs to build and drive a level.
    //!
    //! ```rust
    //! use flipside::prelude::*;
    //! ```

    pub use crate::geometry::{Aabb, Orientation};
    pub use crate::hazards::{HazardDescriptor, HazardPlacement, LaunchDirection};
    pub use crate::level::{ColliderPlacement, LevelDescriptor};
    pub use crate::world::{PlatformStyle, SurfaceTag};
    pub use crate::{
        GravityDirection, InputIntent, PhysicsConfig, SimEvent, Simulation, SimulationStatus,
    };
    pub use glam::IVec2;
}
