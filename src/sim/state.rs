//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`, owned by a single
//! session. No globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::bricks::{BrickGrid, BrickId, Tier};
use super::collision::{Collider, ContactTarget, WallSide};
use super::geometry::{Arena, Rect};
use super::paddle::Paddle;
use crate::error::ConfigError;
use crate::settings::{SessionConfig, Tuning};

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Ball stationary, waiting for a start request
    Idle { last_outcome: Option<Outcome> },
    /// Ball launched, contacts resolved every tick
    Playing,
    /// Transient; the state machine drops straight back to Idle
    RoundEnd(Outcome),
}

impl RoundState {
    pub fn is_playing(&self) -> bool {
        matches!(self, RoundState::Playing)
    }

    /// Prompt shown to the player in this state
    pub fn prompt_text(&self) -> &'static str {
        match self {
            RoundState::Idle { last_outcome: None } => "Tap to start",
            RoundState::Idle {
                last_outcome: Some(Outcome::Win),
            }
            | RoundState::RoundEnd(Outcome::Win) => "You win! Tap to play again",
            RoundState::Idle {
                last_outcome: Some(Outcome::Loss),
            }
            | RoundState::RoundEnd(Outcome::Loss) => "You lose! Tap to try again",
            RoundState::Playing => "",
        }
    }
}

/// Something that happened during a tick (for presentation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted,
    WallHit(WallSide),
    PaddleHit,
    BrickHit { id: BrickId, tier: Tier },
    BrickDestroyed { id: BrickId },
    LifeLost { lives_left: u8 },
    RoundEnded { outcome: Outcome, score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub tuning: Tuning,
    /// Seeded RNG for launch angles and anti-stall kicks
    pub rng: Pcg32,
    pub round: RoundState,
    pub score: u64,
    pub lives: u8,
    /// Simulation ticks while Playing
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Static strip along the floor; touching it costs a life
    pub lose_zone: Rect,
}

impl GameState {
    /// Build the idle starting state; fails fast on a bad config
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let arena = Arena::new(config.arena.width, config.arena.height);
        let tuning = config.tuning.clone();
        let mut bricks = BrickGrid::new();
        bricks.layout(&arena, &tuning);

        Ok(Self {
            arena,
            rng: Pcg32::seed_from_u64(config.seed),
            round: RoundState::Idle { last_outcome: None },
            score: 0,
            lives: tuning.starting_lives,
            time_ticks: 0,
            ball: Ball::new(arena.center(), tuning.ball_radius),
            paddle: Paddle::new(&arena, &tuning),
            bricks,
            lose_zone: arena.floor_strip(tuning.lose_zone_height),
            tuning,
        })
    }

    /// Where a fresh ball waits
    pub fn ball_spawn(&self) -> Vec2 {
        self.arena.center()
    }

    /// Every static body the ball can touch: paddle, live bricks, lose zone
    pub fn colliders(&self) -> Vec<Collider> {
        let mut colliders = Vec::with_capacity(self.bricks.remaining_count() + 2);
        colliders.push(Collider {
            target: ContactTarget::Paddle,
            rect: self.paddle.rect(),
        });
        colliders.extend(self.bricks.colliders());
        colliders.push(Collider {
            target: ContactTarget::LoseZone,
            rect: self.lose_zone,
        });
        colliders
    }
}
