//! Brick grid: layout, tier transitions and remaining-count tracking

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Collider, ContactTarget};
use super::geometry::{Arena, Rect};
use crate::consts::BRICK_ROWS;
use crate::error::InvariantViolation;
use crate::settings::Tuning;

/// Stable brick identifier (index into the grid for the current round)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrickId(pub u32);

/// Remaining-hit level of a brick
///
/// A fresh Tier1 brick takes three hits: Tier1 -> Tier2 -> Tier3 -> removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    /// Tier after one more hit, `None` once the brick breaks
    pub fn downgrade(self) -> Option<Tier> {
        match self {
            Tier::Tier1 => Some(Tier::Tier2),
            Tier::Tier2 => Some(Tier::Tier3),
            Tier::Tier3 => None,
        }
    }

    /// Tier assigned to a grid row (row 0 is the lowest row)
    pub fn for_row(row: usize) -> Tier {
        match row {
            0 => Tier::Tier1,
            1 => Tier::Tier2,
            _ => Tier::Tier3,
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    pub rect: Rect,
    pub tier: Tier,
    pub alive: bool,
}

/// What a hit did to a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Downgraded(Tier),
    Removed,
}

/// Brick state as seen by presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Alive(Tier),
    Removed,
}

/// The destructible layout for one round
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    bricks: Vec<Brick>,
    destroyed: usize,
}

impl BrickGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out a fresh 3-row grid, centered horizontally below the ceiling
    ///
    /// Clears any previous bricks and the destroyed counter first. The number
    /// of columns is however many cells of `brick_pitch_x` fit between the
    /// side margins.
    pub fn layout(&mut self, arena: &Arena, tuning: &Tuning) {
        self.bricks.clear();
        self.destroyed = 0;

        let usable = arena.width - 2.0 * tuning.brick_side_margin - tuning.brick_width;
        let columns = (usable / tuning.brick_pitch_x).floor().max(0.0) as usize + 1;
        let first_x = -(columns as f32 - 1.0) * tuning.brick_pitch_x / 2.0;
        let top_y = arena.max_y() - tuning.brick_top_offset;
        let size = Vec2::new(tuning.brick_width, tuning.brick_height);

        for row in 0..BRICK_ROWS {
            let y = top_y - (BRICK_ROWS - 1 - row) as f32 * tuning.brick_pitch_y;
            let tier = Tier::for_row(row);
            for col in 0..columns {
                let x = first_x + col as f32 * tuning.brick_pitch_x;
                self.bricks.push(Brick {
                    id: BrickId(self.bricks.len() as u32),
                    rect: Rect::new(Vec2::new(x, y), size),
                    tier,
                    alive: true,
                });
            }
        }

        log::info!("Laid out {} bricks ({} rows x {} columns)", self.bricks.len(), BRICK_ROWS, columns);
    }

    /// Apply one hit: downgrade the tier, or remove a Tier3 brick
    pub fn hit(&mut self, id: BrickId) -> Result<HitOutcome, InvariantViolation> {
        let brick = self
            .bricks
            .get_mut(id.0 as usize)
            .ok_or(InvariantViolation::UnknownBrick(id))?;
        if !brick.alive {
            return Err(InvariantViolation::BrickNotAlive(id));
        }

        match brick.tier.downgrade() {
            Some(tier) => {
                brick.tier = tier;
                Ok(HitOutcome::Downgraded(tier))
            }
            None => {
                brick.alive = false;
                self.destroyed += 1;
                Ok(HitOutcome::Removed)
            }
        }
    }

    pub fn remaining_count(&self) -> usize {
        self.bricks.len() - self.destroyed
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining_count() == 0
    }

    /// Total bricks laid out this round, alive or not
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.bricks.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    /// Colliders for live bricks only
    pub fn colliders(&self) -> impl Iterator<Item = Collider> + '_ {
        self.bricks.iter().filter(|b| b.alive).map(|b| Collider {
            target: ContactTarget::Brick(b.id),
            rect: b.rect,
        })
    }

    pub fn statuses(&self) -> impl Iterator<Item = (Vec2, BrickStatus)> + '_ {
        self.bricks.iter().map(|b| {
            let status = if b.alive {
                BrickStatus::Alive(b.tier)
            } else {
                BrickStatus::Removed
            };
            (b.rect.center, status)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn laid_out() -> BrickGrid {
        let mut grid = BrickGrid::new();
        grid.layout(&Arena::new(400.0, 700.0), &Tuning::default());
        grid
    }

    #[test]
    fn test_layout_shape() {
        let grid = laid_out();
        assert_eq!(grid.len(), 21);
        assert_eq!(grid.remaining_count(), 21);
        assert!(!grid.is_cleared());

        // Centered horizontally
        let min_x = grid.iter().map(|b| b.rect.min().x).fold(f32::MAX, f32::min);
        let max_x = grid.iter().map(|b| b.rect.max().x).fold(f32::MIN, f32::max);
        assert!((min_x + max_x).abs() < 1e-3);
        assert!(min_x >= -200.0 + 10.0 - 1e-3);

        // Unique positions
        let positions: HashSet<_> = grid
            .iter()
            .map(|b| ((b.rect.center.x * 10.0) as i32, (b.rect.center.y * 10.0) as i32))
            .collect();
        assert_eq!(positions.len(), grid.len());
    }

    #[test]
    fn test_layout_tiers_by_row() {
        let grid = laid_out();
        let top = grid.iter().map(|b| b.rect.center.y).fold(f32::MIN, f32::max);
        let bottom = grid.iter().map(|b| b.rect.center.y).fold(f32::MAX, f32::min);
        assert_eq!(top, 350.0 - 50.0);

        for brick in grid.iter() {
            if brick.rect.center.y == bottom {
                assert_eq!(brick.tier, Tier::Tier1);
            } else if brick.rect.center.y == top {
                assert_eq!(brick.tier, Tier::Tier3);
            } else {
                assert_eq!(brick.tier, Tier::Tier2);
            }
        }
    }

    #[test]
    fn test_tier1_takes_three_hits() {
        let mut grid = laid_out();
        let id = BrickId(0);
        assert_eq!(grid.get(id).unwrap().tier, Tier::Tier1);

        assert_eq!(grid.hit(id), Ok(HitOutcome::Downgraded(Tier::Tier2)));
        assert_eq!(grid.hit(id), Ok(HitOutcome::Downgraded(Tier::Tier3)));
        assert_eq!(grid.remaining_count(), 21);
        assert_eq!(grid.hit(id), Ok(HitOutcome::Removed));
        assert_eq!(grid.remaining_count(), 20);

        // Removed bricks are out of collision and reject further hits
        assert!(grid.colliders().all(|c| c.target != ContactTarget::Brick(id)));
        assert_eq!(grid.hit(id), Err(InvariantViolation::BrickNotAlive(id)));
        assert_eq!(grid.remaining_count(), 20);
    }

    #[test]
    fn test_unknown_brick() {
        let mut grid = laid_out();
        assert_eq!(
            grid.hit(BrickId(999)),
            Err(InvariantViolation::UnknownBrick(BrickId(999)))
        );
    }

    #[test]
    fn test_relayout_resets() {
        let mut grid = laid_out();
        let ids: Vec<_> = grid.iter().map(|b| b.id).collect();
        for id in ids {
            while grid.hit(id).is_ok() {}
        }
        assert!(grid.is_cleared());

        grid.layout(&Arena::new(400.0, 700.0), &Tuning::default());
        assert_eq!(grid.remaining_count(), 21);
        assert!(grid.statuses().all(|(_, s)| matches!(s, BrickStatus::Alive(_))));
    }

    proptest! {
        #[test]
        fn prop_remaining_never_increases(hits in prop::collection::vec(0u32..25, 0..120)) {
            let mut grid = laid_out();
            let mut last = grid.remaining_count();
            for raw in hits {
                let _ = grid.hit(BrickId(raw));
                let now = grid.remaining_count();
                prop_assert!(now <= last);
                last = now;
            }
        }

        #[test]
        fn prop_tier_progression(raw in 0u32..21, extra in 0usize..5) {
            let mut grid = laid_out();
            let id = BrickId(raw);
            let columns = grid.len() / BRICK_ROWS;
            let start = Tier::for_row(raw as usize / columns);
            prop_assert_eq!(grid.get(id).unwrap().tier, start);

            let mut expected = vec![start];
            while let Some(next) = expected.last().unwrap().downgrade() {
                expected.push(next);
            }

            let mut seen = vec![start];
            let mut removals = 0;
            for _ in 0..expected.len() + extra {
                match grid.hit(id) {
                    Ok(HitOutcome::Downgraded(t)) => seen.push(t),
                    Ok(HitOutcome::Removed) => {
                        removals += 1;
                        prop_assert!(!grid.get(id).unwrap().alive);
                    }
                    Err(e) => prop_assert_eq!(e, InvariantViolation::BrickNotAlive(id)),
                }
            }
            prop_assert_eq!(seen, expected);
            prop_assert_eq!(removals, 1);
            prop_assert_eq!(grid.remaining_count(), grid.len() - 1);
        }
    }
}
