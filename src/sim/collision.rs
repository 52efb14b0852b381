//! Collision detection and response for axis-aligned geometry
//!
//! Circle vs rectangle tests for the ball against walls, paddle, bricks and
//! the lose zone. Everything here is a pure function of its inputs: contacts
//! are reported, never applied.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bricks::BrickId;
use super::geometry::{Arena, Rect};

/// Which arena wall was touched (the floor is covered by the lose zone)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
    Top,
}

/// Identity of the body the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactTarget {
    Wall(WallSide),
    Paddle,
    Brick(BrickId),
    LoseZone,
}

/// A static rectangle tagged with its identity
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub target: ContactTarget,
    pub rect: Rect,
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Axis-aligned surface normal pointing toward the ball center
    pub normal: Vec2,
    /// Penetration depth along the normal (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// One reported contact for this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub target: ContactTarget,
    pub normal: Vec2,
    pub penetration: f32,
}

/// Check collision between a ball and a rectangle
///
/// Intersection clamps the ball center into the rectangle and compares the
/// distance to the clamped point against the radius. The normal is taken along
/// the axis of minimum penetration.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.clamp_point(ball_pos);
    if (ball_pos - closest).length_squared() >= ball_radius * ball_radius {
        return CollisionResult::miss();
    }

    let delta = ball_pos - rect.center;
    let overlap = rect.half_size + Vec2::splat(ball_radius) - delta.abs();

    let (normal, penetration) = if overlap.x < overlap.y {
        (Vec2::new(if delta.x >= 0.0 { 1.0 } else { -1.0 }, 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, if delta.y >= 0.0 { 1.0 } else { -1.0 }), overlap.y)
    };

    CollisionResult {
        hit: true,
        normal,
        penetration,
    }
}

/// Check the ball against the left, right and top walls
pub fn ball_wall_collisions(ball_pos: Vec2, ball_radius: f32, arena: &Arena) -> Vec<(WallSide, CollisionResult)> {
    let mut hits = Vec::new();

    let left = ball_pos.x - ball_radius - arena.min_x();
    if left <= 0.0 {
        hits.push((
            WallSide::Left,
            CollisionResult {
                hit: true,
                normal: Vec2::X,
                penetration: -left,
            },
        ));
    }

    let right = arena.max_x() - (ball_pos.x + ball_radius);
    if right <= 0.0 {
        hits.push((
            WallSide::Right,
            CollisionResult {
                hit: true,
                normal: Vec2::NEG_X,
                penetration: -right,
            },
        ));
    }

    let top = arena.max_y() - (ball_pos.y + ball_radius);
    if top <= 0.0 {
        hits.push((
            WallSide::Top,
            CollisionResult {
                hit: true,
                normal: Vec2::NEG_Y,
                penetration: -top,
            },
        ));
    }

    hits
}

/// Every contact the ball makes this tick, walls first, then colliders in order
pub fn detect_contacts(ball_pos: Vec2, ball_radius: f32, arena: &Arena, colliders: &[Collider]) -> Vec<Contact> {
    let walls = ball_wall_collisions(ball_pos, ball_radius, arena)
        .into_iter()
        .map(|(side, result)| Contact {
            target: ContactTarget::Wall(side),
            normal: result.normal,
            penetration: result.penetration,
        });

    let bodies = colliders.iter().filter_map(|collider| {
        let result = ball_rect_collision(ball_pos, ball_radius, &collider.rect);
        result.hit.then_some(Contact {
            target: collider.target,
            normal: result.normal,
            penetration: result.penetration,
        })
    });

    walls.chain(bodies).collect()
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Reflect only when moving into the surface
///
/// With axis-aligned normals this inverts exactly one velocity component.
/// A second contact along the same axis in the same tick leaves the already
/// reflected velocity alone.
#[inline]
pub fn reflect_if_approaching(velocity: Vec2, normal: Vec2) -> Vec2 {
    if velocity.dot(normal) < 0.0 {
        reflect_velocity(velocity, normal)
    } else {
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick_at(x: f32, y: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(50.0, 20.0))
    }

    #[test]
    fn test_ball_rect_collision_from_below() {
        let rect = brick_at(0.0, 100.0);
        // Bottom face at y=90, ball center 5 below it
        let result = ball_rect_collision(Vec2::new(0.0, 85.0), 10.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_Y);
        assert!((result.penetration - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ball_rect_collision_from_side() {
        let rect = brick_at(0.0, 100.0);
        // Right face at x=25
        let result = ball_rect_collision(Vec2::new(32.0, 100.0), 10.0, &rect);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::X);
        assert!((result.penetration - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_ball_rect_collision_corner_miss() {
        let rect = brick_at(0.0, 100.0);
        // Near the corner (25, 110) but diagonally outside the radius
        let result = ball_rect_collision(Vec2::new(33.0, 118.0), 10.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_ball_rect_collision_clear_miss() {
        let rect = brick_at(0.0, 100.0);
        let result = ball_rect_collision(Vec2::new(0.0, 0.0), 10.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_wall_collisions() {
        let arena = Arena::new(400.0, 700.0);

        assert!(ball_wall_collisions(Vec2::ZERO, 10.0, &arena).is_empty());

        let hits = ball_wall_collisions(Vec2::new(-195.0, 0.0), 10.0, &arena);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, WallSide::Left);
        assert_eq!(hits[0].1.normal, Vec2::X);

        // Top-right corner touches two walls at once
        let hits = ball_wall_collisions(Vec2::new(195.0, 345.0), 10.0, &arena);
        let sides: Vec<_> = hits.iter().map(|(side, _)| *side).collect();
        assert_eq!(sides, vec![WallSide::Right, WallSide::Top]);
    }

    #[test]
    fn test_no_floor_wall() {
        let arena = Arena::new(400.0, 700.0);
        assert!(ball_wall_collisions(Vec2::new(0.0, -348.0), 10.0, &arena).is_empty());
    }

    #[test]
    fn test_detect_contacts_reports_every_overlap() {
        let arena = Arena::new(400.0, 700.0);
        let colliders = [
            Collider {
                target: ContactTarget::Brick(BrickId(0)),
                rect: brick_at(-25.0, 100.0),
            },
            Collider {
                target: ContactTarget::Brick(BrickId(1)),
                rect: brick_at(30.0, 100.0),
            },
            Collider {
                target: ContactTarget::Paddle,
                rect: brick_at(0.0, -250.0),
            },
        ];

        // Ball straddles the gap between the two bricks, from below
        let contacts = detect_contacts(Vec2::new(2.5, 85.0), 10.0, &arena, &colliders);
        let targets: Vec<_> = contacts.iter().map(|c| c.target).collect();
        assert_eq!(
            targets,
            vec![ContactTarget::Brick(BrickId(0)), ContactTarget::Brick(BrickId(1))]
        );
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_reflect_if_approaching_only_flips_once() {
        let v = Vec2::new(30.0, 120.0);
        let once = reflect_if_approaching(v, Vec2::NEG_Y);
        assert_eq!(once, Vec2::new(30.0, -120.0));
        // Second brick along the same axis in the same tick
        let twice = reflect_if_approaching(once, Vec2::NEG_Y);
        assert_eq!(twice, once);
    }
}
