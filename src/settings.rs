//! Session configuration and gameplay tuning
//!
//! Loaded from JSON by the host. Every field has a default, so a partial
//! document (or `{}`) is a valid config.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Arena dimensions injected at session construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Gameplay tuning (data-driven game balance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_radius: f32,
    /// Launch scale `k` in pixels/second per impulse unit
    pub launch_scale: f32,
    /// Vertical launch component in impulse units (upward)
    pub launch_vy_units: f32,
    /// Horizontal launch bound in impulse units (symmetric)
    pub launch_vx_units: f32,
    pub stall_threshold: f32,
    pub stall_kick_min: f32,
    pub stall_kick_max: f32,
    /// Multiplicative speed-up applied on every brick contact
    pub brick_speedup: f32,

    // === Paddle ===
    pub paddle_width_fraction: f32,
    pub paddle_height: f32,
    pub paddle_floor_offset: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_pitch_x: f32,
    pub brick_pitch_y: f32,
    pub brick_top_offset: f32,
    pub brick_side_margin: f32,

    // === Rules ===
    pub lose_zone_height: f32,
    pub points_per_hit: u64,
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            launch_scale: LAUNCH_SCALE,
            launch_vy_units: LAUNCH_VY_UNITS,
            launch_vx_units: LAUNCH_VX_UNITS,
            stall_threshold: STALL_THRESHOLD,
            stall_kick_min: STALL_KICK_MIN,
            stall_kick_max: STALL_KICK_MAX,
            brick_speedup: BRICK_SPEEDUP,

            paddle_width_fraction: PADDLE_WIDTH_FRACTION,
            paddle_height: PADDLE_HEIGHT,
            paddle_floor_offset: PADDLE_FLOOR_OFFSET,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_pitch_x: BRICK_PITCH_X,
            brick_pitch_y: BRICK_PITCH_Y,
            brick_top_offset: BRICK_TOP_OFFSET,
            brick_side_margin: BRICK_SIDE_MARGIN,

            lose_zone_height: LOSE_ZONE_HEIGHT,
            points_per_hit: POINTS_PER_HIT,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    fn check(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ball_radius", self.ball_radius),
            ("launch_scale", self.launch_scale),
            ("launch_vy_units", self.launch_vy_units),
            ("paddle_width_fraction", self.paddle_width_fraction),
            ("paddle_height", self.paddle_height),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("lose_zone_height", self.lose_zone_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }

        let non_negative = [
            ("launch_vx_units", self.launch_vx_units),
            ("stall_threshold", self.stall_threshold),
            ("stall_kick_min", self.stall_kick_min),
            ("brick_side_margin", self.brick_side_margin),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }

        if !(self.stall_kick_max.is_finite() && self.stall_kick_max >= self.stall_kick_min) {
            return Err(ConfigError::InvalidTuning {
                field: "stall_kick_max",
                value: self.stall_kick_max,
            });
        }
        if !(self.brick_speedup.is_finite() && self.brick_speedup >= 1.0) {
            return Err(ConfigError::InvalidTuning {
                field: "brick_speedup",
                value: self.brick_speedup,
            });
        }
        if self.paddle_width_fraction > 1.0 {
            return Err(ConfigError::InvalidTuning {
                field: "paddle_width_fraction",
                value: self.paddle_width_fraction,
            });
        }
        // Bricks must not overlap, or two cells would share a position
        if self.brick_pitch_x < self.brick_width || self.brick_pitch_y < self.brick_height {
            return Err(ConfigError::InvalidTuning {
                field: "brick_pitch",
                value: self.brick_pitch_x.min(self.brick_pitch_y),
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::InvalidTuning {
                field: "starting_lives",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub arena: ArenaConfig,
    /// Seed for launch angles and anti-stall kicks
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            seed: 0x5EED,
            tuning: Tuning::default(),
        }
    }
}

impl SessionConfig {
    /// Config for the given arena size with default tuning
    pub fn with_arena(width: f32, height: f32) -> Self {
        Self {
            arena: ArenaConfig { width, height },
            ..Self::default()
        }
    }

    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: arena {}x{}, seed {}",
            config.arena.width,
            config.arena.height,
            config.seed
        );
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ArenaConfig { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite()) {
            return Err(ConfigError::NonFiniteArena);
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::DegenerateArena { width, height });
        }

        self.tuning.check()?;
        let t = &self.tuning;

        let usable_width = width - 2.0 * t.brick_side_margin;
        if usable_width < t.brick_width {
            return Err(ConfigError::ArenaTooSmall {
                reason: "not even one brick column fits",
            });
        }
        if 2.0 * t.ball_radius >= width {
            return Err(ConfigError::ArenaTooSmall {
                reason: "ball is wider than the arena",
            });
        }

        // Floor to ceiling: lose zone, paddle, open space for the ball, bricks
        let paddle_top = t.paddle_floor_offset + t.paddle_height / 2.0;
        let grid_bottom = height
            - t.brick_top_offset
            - (BRICK_ROWS as f32 - 1.0) * t.brick_pitch_y
            - t.brick_height / 2.0;
        if t.paddle_floor_offset - t.paddle_height / 2.0 < t.lose_zone_height {
            return Err(ConfigError::ArenaTooSmall {
                reason: "paddle overlaps the lose zone",
            });
        }
        if grid_bottom - paddle_top < 2.0 * t.ball_radius {
            return Err(ConfigError::ArenaTooSmall {
                reason: "no room for the ball between paddle and bricks",
            });
        }
        if height / 2.0 + t.ball_radius >= grid_bottom || height / 2.0 - t.ball_radius <= paddle_top {
            return Err(ConfigError::ArenaTooSmall {
                reason: "ball spawn point overlaps the paddle or bricks",
            });
        }
        Ok(())
    }
}
