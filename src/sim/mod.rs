//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (walls, paddle, bricks by id, lose zone)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bricks;
pub mod collision;
pub mod geometry;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use bricks::{Brick, BrickGrid, BrickId, BrickStatus, HitOutcome, Tier};
pub use collision::{
    Collider, CollisionResult, Contact, ContactTarget, WallSide, ball_rect_collision, ball_wall_collisions,
    detect_contacts, reflect_velocity,
};
pub use geometry::{Arena, Rect};
pub use paddle::Paddle;
pub use state::{GameEvent, GameState, Outcome, RoundState};
pub use tick::{move_paddle, start_round, tick};
