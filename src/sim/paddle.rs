//! Player paddle: horizontal position clamped to the arena

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Arena, Rect};
use crate::settings::Tuning;

/// The player's paddle (fixed height above the floor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x
    pub x: f32,
    /// Center y (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered paddle sized for the arena
    pub fn new(arena: &Arena, tuning: &Tuning) -> Self {
        Self {
            x: arena.center().x,
            y: arena.min_y() + tuning.paddle_floor_offset,
            width: arena.width * tuning.paddle_width_fraction,
            height: tuning.paddle_height,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos(), Vec2::new(self.width, self.height))
    }

    /// Move the paddle center to `x`, clamped so the paddle stays in the arena
    pub fn move_to(&mut self, x: f32, arena: &Arena) {
        let half = self.width / 2.0;
        let lo = arena.min_x() + half;
        let hi = arena.max_x() - half;
        self.x = if x.is_nan() { self.x } else { x.clamp(lo, hi) };
    }

    pub fn recenter(&mut self, arena: &Arena) {
        self.x = arena.center().x;
    }
}
