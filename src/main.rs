//! Brick Breaker headless host
//!
//! Runs the simulation natively with an autopilot paddle that tracks the ball.
//!
//! Usage: `brick-breaker [config.json] [ticks]`

use std::process::ExitCode;

use brick_breaker::consts::SIM_DT;
use brick_breaker::sim::{GameEvent, Outcome};
use brick_breaker::{GameSession, SessionConfig};

const DEFAULT_TICKS: u64 = 60 * 60 * 5;

fn load_config(path: Option<&str>) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(SessionConfig::from_json(&json)?)
        }
        None => Ok(SessionConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let ticks = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut session = match GameSession::new(&config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut rounds = 0u32;
    let mut wins = 0u32;
    session.on_start_requested();

    for _ in 0..ticks {
        // Autopilot: keep the paddle under the ball
        session.on_pointer_moved(session.ball_position().x);

        for event in session.on_tick(SIM_DT) {
            match event {
                GameEvent::LifeLost { lives_left } => log::info!("Life lost ({} left)", lives_left),
                GameEvent::RoundEnded { outcome, score } => {
                    rounds += 1;
                    if outcome == Outcome::Win {
                        wins += 1;
                    }
                    println!("Round {}: {:?}, score {}", rounds, outcome, score);
                    session.on_start_requested();
                }
                _ => {}
            }
        }
    }

    let snapshot = session.snapshot();
    println!(
        "{} ticks, {} rounds ({} won). {} | {} | {:?}",
        snapshot.frame,
        rounds,
        wins,
        session.score_label(),
        session.lives_label(),
        snapshot.round_state
    );
    ExitCode::SUCCESS
}
