//! Ball motion: launch, integration, impulses and anti-stall correction
//!
//! Velocity only changes through impulses, reflections and the brick speed-up.
//! There is no gravity, friction or damping.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::Tuning;

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Launched balls integrate; unlaunched balls sit still
    pub launched: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            launched: false,
        }
    }

    /// Put the ball back at `pos`, stationary and not launched
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.launched = false;
    }

    /// Launch with a fixed upward component and a random horizontal one
    ///
    /// vy = units_y * k, vx drawn from [-units_x * k, units_x * k].
    pub fn launch<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        let k = tuning.launch_scale;
        let spread = tuning.launch_vx_units;
        let vx = rng.random_range(-spread..=spread) * k;
        let vy = tuning.launch_vy_units * k;

        self.vel = Vec2::ZERO;
        self.launched = true;
        self.apply_impulse(Vec2::new(vx, vy));
        log::debug!("Ball launched with velocity ({:.1}, {:.1})", vx, vy);
    }

    /// Advance position by velocity * dt (no-op before launch)
    pub fn tick(&mut self, dt: f32) {
        if self.launched {
            self.pos += self.vel * dt;
        }
    }

    pub fn apply_impulse(&mut self, dv: Vec2) {
        self.vel += dv;
    }

    /// Multiply both velocity components by `factor`
    pub fn scale_velocity(&mut self, factor: f32) {
        self.vel *= factor;
    }

    /// Kick any axis whose speed has dropped below the stall threshold
    ///
    /// Runs every tick after integration. The kick keeps the current direction
    /// along that axis (random when the component is exactly zero). Returns
    /// true if a kick was applied.
    pub fn correct_stall<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) -> bool {
        if !self.launched {
            return false;
        }

        let mut kicked = false;
        for axis in [Vec2::X, Vec2::Y] {
            let component = self.vel.dot(axis);
            if component.abs() >= tuning.stall_threshold {
                continue;
            }
            let magnitude = rng.random_range(tuning.stall_kick_min..=tuning.stall_kick_max);
            let sign = if component > 0.0 {
                1.0
            } else if component < 0.0 {
                -1.0
            } else if rng.random_bool(0.5) {
                1.0
            } else {
                -1.0
            };
            self.apply_impulse(axis * magnitude * sign);
            kicked = true;
        }

        if kicked {
            log::debug!("Anti-stall kick, velocity now ({:.1}, {:.1})", self.vel.x, self.vel.y);
        }
        kicked
    }
}
