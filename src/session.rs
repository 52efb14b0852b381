//! Game session: the host-facing surface of the simulation
//!
//! Owns the game state, queues input events until the next tick boundary, and
//! publishes an immutable snapshot after every tick so presentation (possibly
//! on another thread) never sees a half-updated frame.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec2;
use serde::Serialize;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::{ConfigError, InvariantViolation};
use crate::settings::SessionConfig;
use crate::sim::{self, BrickStatus, GameEvent, GameState, Outcome, RoundState};

/// External input, applied in arrival order at the start of the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Start tap
    StartRequested,
    /// Pointer/touch x position, already in arena coordinates
    PointerMoved(f32),
}

/// Position and state of one brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickView {
    pub position: Vec2,
    pub status: BrickStatus,
}

/// Everything presentation needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Session tick counter (counts idle ticks too)
    pub frame: u64,
    /// Simulation ticks run while Playing, across every round
    pub sim_ticks: u64,
    pub round_state: RoundState,
    pub score: u64,
    pub lives: u8,
    pub prompt: &'static str,
    pub ball_position: Vec2,
    pub paddle_position: Vec2,
    pub bricks: Vec<BrickView>,
    /// Events produced by the tick that published this snapshot
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    fn capture(state: &GameState, frame: u64, events: Vec<GameEvent>) -> Self {
        Self {
            frame,
            sim_ticks: state.time_ticks,
            round_state: state.round,
            score: state.score,
            lives: state.lives,
            prompt: state.round.prompt_text(),
            ball_position: state.ball.pos,
            paddle_position: state.paddle.pos(),
            bricks: state
                .bricks
                .statuses()
                .map(|(position, status)| BrickView { position, status })
                .collect(),
            events,
        }
    }
}

/// One brick breaker game
pub struct GameSession {
    state: GameState,
    pending: VecDeque<InputEvent>,
    snapshot: Arc<Snapshot>,
    frame: u64,
    accumulator: f32,
}

impl GameSession {
    /// Create an idle session; refuses degenerate configs
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        let state = GameState::new(config)?;
        let snapshot = Arc::new(Snapshot::capture(&state, 0, Vec::new()));
        log::info!(
            "Session created: arena {}x{}, {} bricks",
            state.arena.width,
            state.arena.height,
            state.bricks.len()
        );
        Ok(Self {
            state,
            pending: VecDeque::new(),
            snapshot,
            frame: 0,
            accumulator: 0.0,
        })
    }

    // === Inbound ===

    pub fn on_start_requested(&mut self) {
        self.pending.push_back(InputEvent::StartRequested);
    }

    pub fn on_pointer_moved(&mut self, x: f32) {
        self.pending.push_back(InputEvent::PointerMoved(x));
    }

    /// Apply queued input, advance one step of `dt` seconds, publish a snapshot
    pub fn on_tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid tick duration {}", dt);
            0.0
        };

        let mut events = Vec::new();
        while let Some(input) = self.pending.pop_front() {
            if let Err(violation) = self.apply_input(input, &mut events) {
                match violation {
                    InvariantViolation::PaddleMoveWhileNotPlaying { .. } => {
                        log::debug!("{}", violation)
                    }
                    _ => log::warn!("{}", violation),
                }
            }
        }

        events.extend(sim::tick(&mut self.state, dt));

        self.frame += 1;
        self.snapshot = Arc::new(Snapshot::capture(&self.state, self.frame, events.clone()));
        events
    }

    /// Fixed-timestep driver for hosts with variable frame times
    ///
    /// Runs as many `SIM_DT` ticks as the accumulated time allows, capped at
    /// `MAX_SUBSTEPS` per call. Returns the events of every tick run.
    pub fn advance(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt.min(MAX_FRAME_DT);
        }

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.on_tick(SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        events
    }

    fn apply_input(&mut self, input: InputEvent, events: &mut Vec<GameEvent>) -> Result<(), InvariantViolation> {
        match input {
            InputEvent::StartRequested => events.extend(sim::start_round(&mut self.state)?),
            InputEvent::PointerMoved(x) => sim::move_paddle(&mut self.state, x)?,
        }
        Ok(())
    }

    // === Outbound ===

    /// Snapshot published by the most recent tick
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Read-only view of the live state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ball_position(&self) -> Vec2 {
        self.state.ball.pos
    }

    pub fn paddle_position(&self) -> Vec2 {
        self.state.paddle.pos()
    }

    pub fn brick_states(&self) -> Vec<BrickView> {
        self.state
            .bricks
            .statuses()
            .map(|(position, status)| BrickView { position, status })
            .collect()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn prompt_text(&self) -> &'static str {
        self.state.round.prompt_text()
    }

    pub fn round_state(&self) -> RoundState {
        self.state.round
    }

    /// Outcome of the most recently finished round, if any
    pub fn last_outcome(&self) -> Option<Outcome> {
        match self.state.round {
            RoundState::Idle { last_outcome } => last_outcome,
            RoundState::RoundEnd(outcome) => Some(outcome),
            RoundState::Playing => None,
        }
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.state.score)
    }

    pub fn lives_label(&self) -> String {
        format!("Lives: {}", self.state.lives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(&SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_initial_outbound_state() {
        let s = session();
        assert_eq!(s.round_state(), RoundState::Idle { last_outcome: None });
        assert_eq!(s.prompt_text(), "Tap to start");
        assert_eq!(s.score_label(), "Score: 0");
        assert_eq!(s.lives_label(), "Lives: 3");
        assert_eq!(s.brick_states().len(), 21);
        assert_eq!(s.snapshot().frame, 0);
        assert_eq!(s.snapshot().sim_ticks, 0);
        assert_eq!(s.last_outcome(), None);
    }

    #[test]
    fn test_inputs_wait_for_tick_boundary() {
        let mut s = session();
        s.on_start_requested();
        assert_eq!(s.round_state(), RoundState::Idle { last_outcome: None });

        let events = s.on_tick(SIM_DT);
        assert_eq!(events.first(), Some(&GameEvent::RoundStarted));
        assert_eq!(s.round_state(), RoundState::Playing);
        assert_eq!(s.prompt_text(), "");
    }

    #[test]
    fn test_pointer_ignored_until_playing() {
        let mut s = session();
        s.on_pointer_moved(120.0);
        s.on_tick(SIM_DT);
        assert_eq!(s.paddle_position().x, 0.0);

        s.on_start_requested();
        s.on_pointer_moved(120.0);
        s.on_tick(SIM_DT);
        assert_eq!(s.paddle_position().x, 120.0);

        s.on_pointer_moved(9999.0);
        s.on_tick(SIM_DT);
        assert_eq!(s.paddle_position().x, 150.0);
    }

    #[test]
    fn test_snapshot_is_immutable_per_tick() {
        let mut s = session();
        s.on_tick(SIM_DT);
        assert_eq!(s.snapshot().sim_ticks, 0);
        s.on_start_requested();
        s.on_tick(SIM_DT);
        let first = s.snapshot();
        s.on_tick(SIM_DT);
        let second = s.snapshot();

        assert_eq!(first.frame, 2);
        assert_eq!(second.frame, 3);
        assert_eq!(first.sim_ticks, 1);
        assert_eq!(second.sim_ticks, 2);
        assert_ne!(first.ball_position, second.ball_position);
        assert_eq!(first.events, vec![GameEvent::RoundStarted]);
        assert_eq!(second.ball_position, s.ball_position());
    }

    #[test]
    fn test_invalid_dt_does_not_move_ball() {
        let mut s = session();
        s.on_start_requested();
        s.on_tick(0.0);
        let before = s.ball_position();
        s.on_tick(f32::NAN);
        s.on_tick(-1.0);
        assert_eq!(s.ball_position(), before);
    }

    #[test]
    fn test_advance_runs_fixed_substeps() {
        let mut s = session();
        s.advance(SIM_DT * 3.5);
        assert_eq!(s.snapshot().frame, 3);

        // Long frames are clamped and capped
        s.advance(10.0);
        assert!(s.snapshot().frame <= 3 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_snapshot_serializes() {
        let s = session();
        let json = serde_json::to_string(&*s.snapshot()).unwrap();
        assert!(json.contains("\"prompt\":\"Tap to start\""));
    }
}
