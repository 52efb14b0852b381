//! Error types
//!
//! Configuration problems are fatal at session construction. Invariant
//! violations are reported to the caller, logged, and the offending event is
//! dropped; the simulation keeps running.

use std::fmt;

use crate::sim::{BrickId, RoundState};

/// Rejected session configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Width or height is zero or negative
    DegenerateArena { width: f32, height: f32 },
    /// Width or height is NaN or infinite
    NonFiniteArena,
    /// A tuning value is out of range
    InvalidTuning { field: &'static str, value: f32 },
    /// The arena cannot hold the paddle, the brick grid, or the lose zone
    ArenaTooSmall { reason: &'static str },
    /// Config document could not be parsed
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DegenerateArena { width, height } => {
                write!(f, "degenerate arena {}x{}: both sides must be positive", width, height)
            }
            ConfigError::NonFiniteArena => write!(f, "arena dimensions must be finite"),
            ConfigError::InvalidTuning { field, value } => {
                write!(f, "invalid tuning value {} = {}", field, value)
            }
            ConfigError::ArenaTooSmall { reason } => write!(f, "arena too small: {}", reason),
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// A logic error observed at runtime (ignored, never fatal)
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// Contact reported against a brick that was already removed
    BrickNotAlive(BrickId),
    /// Contact reported against a brick id the grid never issued
    UnknownBrick(BrickId),
    /// Paddle move requested outside of Playing
    PaddleMoveWhileNotPlaying { state: RoundState },
    /// Start requested while a round is already in progress
    StartWhilePlaying,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::BrickNotAlive(id) => {
                write!(f, "hit reported for removed brick {}", id.0)
            }
            InvariantViolation::UnknownBrick(id) => write!(f, "hit reported for unknown brick {}", id.0),
            InvariantViolation::PaddleMoveWhileNotPlaying { state } => {
                write!(f, "paddle move ignored in state {:?}", state)
            }
            InvariantViolation::StartWhilePlaying => write!(f, "start ignored: round already playing"),
        }
    }
}

impl std::error::Error for InvariantViolation {}
