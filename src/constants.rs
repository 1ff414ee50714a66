//! Simulation tuning defaults used to build [`crate::PhysicsConfig`].
//!
//! Units are pixels and ticks; the simulation runs at [`TICK_RATE_HZ`] and
//! screen space grows downward, so positive Y is "down".

/// Simulation steps per second.
pub const TICK_RATE_HZ: u32 = 60;
/// Edge length of a level tile.
pub const TILE_SIZE: i32 = 40;
/// Gravity acceleration per tick.
pub const GRAVITY_PULL: f64 = 0.4;
/// Terminal speed along gravity.
pub const MAX_FALL_SPEED: f64 = 10.0;
/// Ground jump launch speed.
pub const JUMP_STRENGTH: f64 = 10.0;
/// Target run speed.
pub const MAX_RUN_SPEED: f64 = 6.0;
/// Fraction of the gap to the run target closed per tick.
pub const RUN_ACCELERATION: f64 = 0.4;
/// Fraction of horizontal speed lost per idle tick.
pub const GROUND_FRICTION: f64 = 0.1;
/// Speeds below this magnitude snap to zero (or onto the run target).
pub const VELOCITY_SNAP: f64 = 0.1;
/// Fall speed cap while wall sliding.
pub const WALL_SLIDE_SPEED: f64 = 1.0;
/// Sideways push of a wall jump.
pub const WALL_JUMP_HORIZONTAL: f64 = 7.0;
/// Launch speed of a wall jump.
pub const WALL_JUMP_VERTICAL: f64 = 15.0;
/// Ticks of ignored run input after a wall jump.
pub const WALL_JUMP_COOLDOWN_TICKS: u32 = 10;
/// Rising speed kept when jump is released early.
pub const CUT_JUMP_DAMPING: f64 = 0.4;
/// Run speed factor on boosters.
pub const BOOSTER_SPEED_MULTIPLIER: f64 = 2.0;
/// Jump factor on boosters.
pub const BOOSTER_JUMP_MULTIPLIER: f64 = 2.0;
/// Half a second at [`TICK_RATE_HZ`].
pub const GRAVITY_TRANSITION_TICKS: u32 = 30;
/// Player box width.
pub const PLAYER_WIDTH: i32 = 30;
/// Player box height.
pub const PLAYER_HEIGHT: i32 = 30;
/// Lateral half-width of the band in which a falling hazard notices the player.
pub const FALLING_ACTIVATION_BAND: i32 = 50;
/// Default reach of a falling spike's trigger.
pub const FALLING_ACTIVATION_RADIUS: i32 = 200;
/// Speed cap for falling spikes.
pub const FALLING_MAX_SPEED: f64 = 10.0;
/// Acceleration factor for falling hazards dropping against current gravity.
pub const FALLING_COUNTER_GRAVITY_FACTOR: f64 = 1.5;
/// Speed of a sideways falling spike.
pub const FALLING_LATERAL_SPEED: f64 = 5.0;
/// Projectile speed in pixels per tick.
pub const PROJECTILE_SPEED: f64 = 5.0;
/// Projectile box width.
pub const PROJECTILE_WIDTH: i32 = 30;
/// Projectile box height.
pub const PROJECTILE_HEIGHT: i32 = 8;
/// Edge length of a launcher box.
pub const LAUNCHER_SIZE: i32 = 20;
/// Upper bound of a launcher's extra first delay.
pub const LAUNCHER_INITIAL_JITTER_TICKS: u32 = 30;
/// Edge length of a gravity switch.
pub const SWITCH_SIZE: i32 = 25;
/// Edge length of a key pickup.
pub const KEY_SIZE: i32 = 20;
/// Goal door width.
pub const GOAL_WIDTH: i32 = 40;
/// Goal door height; taller than a tile.
pub const GOAL_HEIGHT: i32 = 60;
/// Remaining sweep distance below which the vertical sweep stops.
pub const SWEEP_EPSILON: f64 = 1e-3;
