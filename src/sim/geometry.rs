//! Axis-aligned geometry for the arena, paddle, bricks and lose zone
//!
//! Coordinates are arena-centered with +y pointing up:
//! - x spans [-width/2, width/2]
//! - y spans [-height/2, height/2]

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_size: size / 2.0,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_size
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_size
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_size * 2.0
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Immutable play bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        -self.width / 2.0
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        -self.height / 2.0
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Arena center (the origin)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Strip of the given height along the floor, spanning the full width
    pub fn floor_strip(&self, height: f32) -> Rect {
        Rect::new(
            Vec2::new(0.0, self.min_y() + height / 2.0),
            Vec2::new(self.width, height),
        )
    }
}
