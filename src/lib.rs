//! Brick Breaker - a single-level brick breaker simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, ball, bricks, paddle, round state)
//! - `session`: Host-facing session (input queue, fixed timestep, snapshots)
//! - `settings`: Session configuration and gameplay tuning
//! - `error`: Configuration errors and invariant violations

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, InvariantViolation};
pub use session::{GameSession, InputEvent, Snapshot};
pub use settings::{ArenaConfig, SessionConfig, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the fixed-step driver will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Longest ball move per collision substep, as a fraction of its radius
    pub const BALL_STEP_FRACTION: f32 = 0.5;
    /// Collision substeps per tick (beyond this the floor backstop catches the ball)
    pub const MAX_BALL_SUBSTEPS: u32 = 256;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 700.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Launch scale `k`: one impulse unit in pixels/second
    pub const LAUNCH_SCALE: f32 = 60.0;
    /// Launch vertical component, in impulse units (always upward)
    pub const LAUNCH_VY_UNITS: f32 = 5.0;
    /// Launch horizontal component bound, in impulse units (drawn from [-5, 5])
    pub const LAUNCH_VX_UNITS: f32 = 5.0;
    /// Per-axis speed below which the anti-stall kick fires (pixels/s)
    pub const STALL_THRESHOLD: f32 = 30.0;
    /// Anti-stall kick magnitude range (pixels/s)
    pub const STALL_KICK_MIN: f32 = 30.0;
    pub const STALL_KICK_MAX: f32 = 60.0;
    /// Speed boost on every brick contact (multiplicative, both axes)
    pub const BRICK_SPEEDUP: f32 = 1.02;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Paddle width as a fraction of the arena width
    pub const PADDLE_WIDTH_FRACTION: f32 = 0.25;
    /// Paddle center height above the arena floor
    pub const PADDLE_FLOOR_OFFSET: f32 = 100.0;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Cell pitch (brick size plus gap)
    pub const BRICK_PITCH_X: f32 = 55.0;
    pub const BRICK_PITCH_Y: f32 = 25.0;
    /// Top row center distance below the arena ceiling
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
    /// Minimum clearance kept between the grid and the side walls
    pub const BRICK_SIDE_MARGIN: f32 = 10.0;
    pub const BRICK_ROWS: usize = 3;

    /// Lose zone height along the arena floor
    pub const LOSE_ZONE_HEIGHT: f32 = 50.0;

    /// Scoring and lives
    pub const POINTS_PER_HIT: u64 = 1;
    pub const STARTING_LIVES: u8 = 3;
}
