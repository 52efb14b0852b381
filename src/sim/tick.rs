//! Round state machine
//!
//! Idle -> Playing on a start request; Playing -> RoundEnd(Win|Loss) when the
//! grid is cleared or the last life is lost; RoundEnd -> Idle immediately.

use std::ops::ControlFlow;

use glam::Vec2;

use super::collision::{Contact, ContactTarget, detect_contacts, reflect_if_approaching};
use super::bricks::HitOutcome;
use super::state::{GameEvent, GameState, Outcome, RoundState};
use crate::consts::{BALL_STEP_FRACTION, MAX_BALL_SUBSTEPS};
use crate::error::InvariantViolation;

/// Start a round from Idle: fresh score, lives, grid, paddle and ball, then launch
pub fn start_round(state: &mut GameState) -> Result<Vec<GameEvent>, InvariantViolation> {
    if state.round.is_playing() {
        return Err(InvariantViolation::StartWhilePlaying);
    }

    state.score = 0;
    state.lives = state.tuning.starting_lives;
    state.bricks.layout(&state.arena, &state.tuning);
    state.paddle.recenter(&state.arena);
    let spawn = state.ball_spawn();
    state.ball.reset(spawn);
    state.ball.launch(&mut state.rng, &state.tuning);
    state.round = RoundState::Playing;

    log::info!("Round started: {} lives, {} bricks", state.lives, state.bricks.remaining_count());
    Ok(vec![GameEvent::RoundStarted])
}

/// Move the paddle; only accepted while Playing
pub fn move_paddle(state: &mut GameState, x: f32) -> Result<(), InvariantViolation> {
    if !state.round.is_playing() {
        return Err(InvariantViolation::PaddleMoveWhileNotPlaying { state: state.round });
    }
    state.paddle.move_to(x, &state.arena);
    Ok(())
}

/// Advance the simulation by one tick of `dt` seconds
///
/// The ball moves in substeps of at most half its radius (capped at
/// `MAX_BALL_SUBSTEPS`), so a long `dt` or a fast ball cannot skip over the
/// paddle, a brick or the lose zone. Each substep integrates, runs the
/// anti-stall check, then resolves every contact it reports. Stepping stops at
/// the first lost life or round end. Does nothing outside of Playing.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.round.is_playing() {
        return events;
    }

    state.time_ticks += 1;

    let travel = state.ball.vel.length() * dt;
    let step_size = state.ball.radius * BALL_STEP_FRACTION;
    let num_steps = ((travel / step_size).ceil() as u32).clamp(1, MAX_BALL_SUBSTEPS);
    let step_dt = dt / num_steps as f32;

    for _step in 0..num_steps {
        if substep(state, step_dt, &mut events).is_break() {
            break;
        }
    }
    events
}

/// One substep; breaks once a life is lost or the round ends
fn substep(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> ControlFlow<()> {
    state.ball.tick(dt);
    state.ball.correct_stall(&mut state.rng, &state.tuning);

    let mut contacts = detect_contacts(state.ball.pos, state.ball.radius, &state.arena, &state.colliders());

    // Backstop: nothing below the floor can bring the ball back
    if state.ball.pos.y < state.arena.min_y() && contacts.iter().all(|c| c.target != ContactTarget::LoseZone) {
        contacts.push(Contact {
            target: ContactTarget::LoseZone,
            normal: Vec2::Y,
            penetration: 0.0,
        });
    }

    // Largest push-out per axis, applied once after all contacts
    let mut correction = Vec2::ZERO;

    for contact in contacts {
        match contact.target {
            ContactTarget::Wall(side) => {
                state.ball.vel = reflect_if_approaching(state.ball.vel, contact.normal);
                events.push(GameEvent::WallHit(side));
            }
            ContactTarget::Paddle => {
                state.ball.vel = reflect_if_approaching(state.ball.vel, contact.normal);
                events.push(GameEvent::PaddleHit);
            }
            ContactTarget::Brick(id) => {
                let outcome = match state.bricks.hit(id) {
                    Ok(outcome) => outcome,
                    Err(violation) => {
                        log::error!("Ignoring contact: {}", violation);
                        continue;
                    }
                };

                state.score += state.tuning.points_per_hit;
                state.ball.scale_velocity(state.tuning.brick_speedup);
                state.ball.vel = reflect_if_approaching(state.ball.vel, contact.normal);

                match outcome {
                    HitOutcome::Downgraded(tier) => events.push(GameEvent::BrickHit { id, tier }),
                    HitOutcome::Removed => events.push(GameEvent::BrickDestroyed { id }),
                }
                log::debug!(
                    "Brick {} hit ({:?}), score {}, {} left",
                    id.0,
                    outcome,
                    state.score,
                    state.bricks.remaining_count()
                );

                if state.bricks.is_cleared() {
                    end_round(state, Outcome::Win, events);
                    return ControlFlow::Break(());
                }
            }
            ContactTarget::LoseZone => {
                lose_life(state, events);
                return ControlFlow::Break(());
            }
        }

        let push = contact.normal * contact.penetration;
        if push.x.abs() > correction.x.abs() {
            correction.x = push.x;
        }
        if push.y.abs() > correction.y.abs() {
            correction.y = push.y;
        }
    }

    state.ball.pos += correction;
    ControlFlow::Continue(())
}

/// Lose-zone contact: spend a life, then relaunch or end the round
fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });
    log::info!("Life lost, {} remaining", state.lives);

    if state.lives == 0 {
        end_round(state, Outcome::Loss, events);
        return;
    }

    // Next life: fresh ball, grid and score, still Playing
    state.score = 0;
    state.bricks.layout(&state.arena, &state.tuning);
    let spawn = state.ball_spawn();
    state.ball.reset(spawn);
    state.ball.launch(&mut state.rng, &state.tuning);
}

/// Playing -> RoundEnd(outcome) -> Idle, keeping the final score for display
fn end_round(state: &mut GameState, outcome: Outcome, events: &mut Vec<GameEvent>) {
    state.round = RoundState::RoundEnd(outcome);
    events.push(GameEvent::RoundEnded {
        outcome,
        score: state.score,
    });
    log::info!("Round ended: {:?} with score {}", outcome, state.score);

    let spawn = state.ball_spawn();
    state.ball.reset(spawn);
    state.paddle.recenter(&state.arena);
    state.round = RoundState::Idle {
        last_outcome: Some(outcome),
    };
}
