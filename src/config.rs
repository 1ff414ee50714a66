//! Runtime tuning for the simulation.
//!
//! [`PhysicsConfig::default`] reproduces the constants in
//! [`crate::constants`]. The struct deserialises with every field optional,
//! so a host may override only the values it cares about.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BOOSTER_JUMP_MULTIPLIER, BOOSTER_SPEED_MULTIPLIER, CUT_JUMP_DAMPING, FALLING_ACTIVATION_BAND,
    FALLING_COUNTER_GRAVITY_FACTOR, FALLING_LATERAL_SPEED, FALLING_MAX_SPEED, GRAVITY_PULL,
    GRAVITY_TRANSITION_TICKS, GROUND_FRICTION, JUMP_STRENGTH, LAUNCHER_INITIAL_JITTER_TICKS,
    MAX_FALL_SPEED, MAX_RUN_SPEED, PLAYER_HEIGHT, PLAYER_WIDTH, PROJECTILE_HEIGHT,
    PROJECTILE_SPEED, PROJECTILE_WIDTH, RUN_ACCELERATION, TILE_SIZE, VELOCITY_SNAP,
    WALL_JUMP_COOLDOWN_TICKS, WALL_JUMP_HORIZONTAL, WALL_JUMP_VERTICAL, WALL_SLIDE_SPEED,
};
use crate::error::ConfigError;

/// Tuning values, in pixels and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Edge length of one level tile.
    pub tile_size: i32,
    /// Gravity acceleration per tick.
    pub gravity: f64,
    /// Cap on speed along the gravity direction.
    pub max_fall_speed: f64,
    /// Launch speed of a ground jump, before boosters.
    pub jump_strength: f64,
    /// Horizontal speed the run input converges to.
    pub max_run_speed: f64,
    /// Fraction of the gap to the target run speed closed each tick.
    pub run_acceleration: f64,
    /// Fraction of horizontal speed lost each tick without input.
    pub friction: f64,
    /// Speeds closer than this to their target snap onto it.
    pub velocity_snap: f64,
    /// Fall speed cap while pressed against a wall.
    pub wall_slide_speed: f64,
    /// Horizontal push away from the wall on a wall jump.
    pub wall_jump_horizontal: f64,
    /// Launch speed of a wall jump against gravity.
    pub wall_jump_vertical: f64,
    /// Ticks after a wall jump during which run input is ignored.
    pub wall_jump_cooldown_ticks: u32,
    /// Factor applied to rising speed when jump is released early.
    pub cut_jump_damping: f64,
    /// Run speed factor while standing on a booster.
    pub booster_speed_multiplier: f64,
    /// Jump strength factor while standing on a booster.
    pub booster_jump_multiplier: f64,
    /// Length of a gravity flip animation.
    pub gravity_transition_ticks: u32,
    /// Pause every body while a gravity transition plays.
    pub freeze_world_during_transition: bool,
    /// Player box size.
    pub player_size: IVec2,
    /// Half-width of the strip in which a falling spike notices the player.
    pub falling_activation_band: i32,
    /// Speed cap for falling spikes.
    pub falling_max_speed: f64,
    /// Acceleration factor for a spike dropping against gravity.
    pub falling_counter_gravity_factor: f64,
    /// Constant speed of a sideways falling spike.
    pub falling_lateral_speed: f64,
    /// Projectile speed in pixels per tick.
    pub projectile_speed: f64,
    /// Projectile box size.
    pub projectile_size: IVec2,
    /// Upper bound of the random delay added to a launcher's first shot.
    pub launcher_initial_jitter_ticks: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            gravity: GRAVITY_PULL,
            max_fall_speed: MAX_FALL_SPEED,
            jump_strength: JUMP_STRENGTH,
            max_run_speed: MAX_RUN_SPEED,
            run_acceleration: RUN_ACCELERATION,
            friction: GROUND_FRICTION,
            velocity_snap: VELOCITY_SNAP,
            wall_slide_speed: WALL_SLIDE_SPEED,
            wall_jump_horizontal: WALL_JUMP_HORIZONTAL,
            wall_jump_vertical: WALL_JUMP_VERTICAL,
            wall_jump_cooldown_ticks: WALL_JUMP_COOLDOWN_TICKS,
            cut_jump_damping: CUT_JUMP_DAMPING,
            booster_speed_multiplier: BOOSTER_SPEED_MULTIPLIER,
            booster_jump_multiplier: BOOSTER_JUMP_MULTIPLIER,
            gravity_transition_ticks: GRAVITY_TRANSITION_TICKS,
            freeze_world_during_transition: false,
            player_size: IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            falling_activation_band: FALLING_ACTIVATION_BAND,
            falling_max_speed: FALLING_MAX_SPEED,
            falling_counter_gravity_factor: FALLING_COUNTER_GRAVITY_FACTOR,
            falling_lateral_speed: FALLING_LATERAL_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            projectile_size: IVec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            launcher_initial_jitter_ticks: LAUNCHER_INITIAL_JITTER_TICKS,
        }
    }
}

impl PhysicsConfig {
    /// Checks every value for sign, range and finiteness.
    ///
    /// # Errors
    /// Returns the first offending field as a [`ConfigError`].
    ///
    /// # Examples
    /// ```
    /// use flipside::PhysicsConfig;
    /// assert!(PhysicsConfig::default().validate().is_ok());
    /// let broken = PhysicsConfig { friction: 1.5, ..PhysicsConfig::default() };
    /// assert!(broken.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_size("tile_size", IVec2::splat(self.tile_size))?;
        positive_size("player_size", self.player_size)?;
        positive_size("projectile_size", self.projectile_size)?;
        if self.falling_activation_band < 0 {
            return Err(ConfigError::InvalidValue {
                field: "falling_activation_band",
                value: f64::from(self.falling_activation_band),
            });
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("jump_strength", self.jump_strength),
            ("max_run_speed", self.max_run_speed),
            ("velocity_snap", self.velocity_snap),
            ("wall_slide_speed", self.wall_slide_speed),
            ("wall_jump_horizontal", self.wall_jump_horizontal),
            ("wall_jump_vertical", self.wall_jump_vertical),
            ("booster_speed_multiplier", self.booster_speed_multiplier),
            ("booster_jump_multiplier", self.booster_jump_multiplier),
            ("falling_max_speed", self.falling_max_speed),
            (
                "falling_counter_gravity_factor",
                self.falling_counter_gravity_factor,
            ),
            ("falling_lateral_speed", self.falling_lateral_speed),
            ("projectile_speed", self.projectile_speed),
        ] {
            non_negative(field, value)?;
        }

        fraction("run_acceleration", self.run_acceleration, "(0, 1]", |v| {
            v > 0.0 && v <= 1.0
        })?;
        fraction("friction", self.friction, "[0, 1)", |v| (0.0..1.0).contains(&v))?;
        fraction("cut_jump_damping", self.cut_jump_damping, "[0, 1)", |v| {
            (0.0..1.0).contains(&v)
        })?;
        Ok(())
    }
}

fn positive_size(field: &'static str, size: IVec2) -> Result<(), ConfigError> {
    if size.x > 0 && size.y > 0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveSize {
            field,
            width: size.x,
            height: size.y,
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn fraction(
    field: &'static str,
    value: f64,
    range: &'static str,
    accepts: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    if accepts(value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange {
            field,
            range,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero_acceleration(PhysicsConfig { run_acceleration: 0.0, ..PhysicsConfig::default() }, "run_acceleration")]
    #[case::full_friction(PhysicsConfig { friction: 1.0, ..PhysicsConfig::default() }, "friction")]
    #[case::nan_gravity(PhysicsConfig { gravity: f64::NAN, ..PhysicsConfig::default() }, "gravity")]
    #[case::flat_player(PhysicsConfig { player_size: IVec2::new(30, 0), ..PhysicsConfig::default() }, "player_size")]
    #[case::negative_band(PhysicsConfig { falling_activation_band: -1, ..PhysicsConfig::default() }, "falling_activation_band")]
    fn invalid_values_name_their_field(#[case] config: PhysicsConfig, #[case] field: &str) {
        let err = config.validate().expect_err("config should be rejected");
        let named = match err {
            ConfigError::NonPositiveSize { field, .. }
            | ConfigError::FractionOutOfRange { field, .. }
            | ConfigError::InvalidValue { field, .. } => field,
        };
        assert_eq!(named, field);
    }

    #[test]
    fn defaults_match_constants() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity_transition_ticks, 30);
        assert_eq!(config.player_size, IVec2::new(30, 30));
        assert!(!config.freeze_world_during_transition);
    }
}
