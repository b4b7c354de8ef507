//! Headless runner commands.
//!
//! `simulate` plays a seeded game with the placement planner, synchronously.
//! `run` drives the async session loop in real time and counts published frames.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::time;

use crate::core::{GameSnapshot, GameState, LockEvent};
use crate::engine::{choose_placement, Frame, GameSettings, Session, SessionLoop};
use crate::types::Difficulty;

pub const DEFAULT_PIECES: u32 = 200;
pub const DEFAULT_RUN_MILLIS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateConfig {
    pub settings: GameSettings,
    pub pieces: u32,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub settings: GameSettings,
    pub millis: u64,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Simulate(SimulateConfig),
    Run(RunConfig),
}

/// Parse command-line arguments (without the program name)
///
/// `base` carries settings already loaded from the environment; flags override it.
/// No arguments at all means `simulate` with defaults.
pub fn parse_args(args: &[String], base: GameSettings) -> Result<Command> {
    let (name, rest) = match args.split_first() {
        Some((name, rest)) => (name.as_str(), rest),
        None => ("simulate", args),
    };
    if name != "simulate" && name != "run" {
        return Err(anyhow!("unknown command: {} (expected simulate or run)", name));
    }

    let mut settings = base;
    let mut pieces = DEFAULT_PIECES;
    let mut millis = DEFAULT_RUN_MILLIS;
    let mut json = false;

    let mut i = 0usize;
    while i < rest.len() {
        match rest[i].as_str() {
            "--seed" => {
                i += 1;
                let v = flag_value(name, "--seed", rest.get(i))?;
                settings.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("{}: invalid --seed value: {}", name, v))?;
            }
            "--difficulty" => {
                i += 1;
                let v = flag_value(name, "--difficulty", rest.get(i))?;
                settings.difficulty = Difficulty::from_str(v)
                    .ok_or_else(|| anyhow!("{}: invalid --difficulty value: {}", name, v))?;
            }
            "--pieces" if name == "simulate" => {
                i += 1;
                let v = flag_value(name, "--pieces", rest.get(i))?;
                pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("{}: invalid --pieces value: {}", name, v))?;
            }
            "--millis" if name == "run" => {
                i += 1;
                let v = flag_value(name, "--millis", rest.get(i))?;
                millis = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("{}: invalid --millis value: {}", name, v))?;
            }
            "--json" => json = true,
            other => {
                return Err(anyhow!("{}: unknown argument: {}", name, other));
            }
        }
        i += 1;
    }

    Ok(match name {
        "run" => Command::Run(RunConfig {
            settings,
            millis,
            json,
        }),
        _ => Command::Simulate(SimulateConfig {
            settings,
            pieces,
            json,
        }),
    })
}

fn flag_value<'a>(command: &str, flag: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{}: missing value for {}", command, flag))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub pieces_locked: u32,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub snapshot: GameSnapshot,
}

/// Play up to `config.pieces` pieces with the placement planner
///
/// `on_lock` sees every lock event with the 1-based piece number and the new state.
pub fn simulate(
    config: &SimulateConfig,
    mut on_lock: impl FnMut(u32, &LockEvent, &GameState),
) -> SimulationReport {
    let now = time::Instant::now();
    let mut session = Session::new(config.settings);
    session.start(now);

    let mut pieces_locked = 0;
    while pieces_locked < config.pieces && !session.state().is_game_over() {
        let Some(plan) = choose_placement(session.state()) else {
            break;
        };
        for action in plan.actions {
            session.apply(action, now);
        }
        if let Some(event) = session.take_last_event() {
            pieces_locked += 1;
            on_lock(pieces_locked, &event, session.state());
        }
    }

    let state = session.state();
    SimulationReport {
        pieces_locked,
        score: state.score(),
        lines: state.lines_cleared(),
        level: state.level(),
        game_over: state.is_game_over(),
        snapshot: session.snapshot(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub frames: u64,
    pub last_frame: Frame,
}

/// Run the session loop for `config.millis` and count frame publications
pub async fn run_for(config: &RunConfig) -> Result<RunReport> {
    let game = SessionLoop::spawn(Session::new(config.settings));
    let mut rx = game.subscribe();
    rx.borrow_and_update();

    let deadline = time::sleep(Duration::from_millis(config.millis));
    tokio::pin!(deadline);

    let mut frames = 0u64;
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = rx.changed() => {
                changed.map_err(|_| anyhow!("run: session loop closed"))?;
                frames += 1;
            }
        }
    }

    game.stop();
    Ok(RunReport {
        frames,
        last_frame: game.frame(),
    })
}

/// One-line-per-field summary of a frame
pub fn status_lines(frame: &Frame) -> [String; 4] {
    let state = &frame.state;
    let mode = if state.is_game_over() {
        "GAME_OVER"
    } else if state.is_paused() {
        "PAUSED"
    } else {
        "PLAY"
    };
    let secs = frame.elapsed_ms / 1000;
    let tenths = (frame.elapsed_ms % 1000) / 100;

    [
        format!("STATE {}", mode),
        format!(
            "SCORE {} LINES {} LEVEL {}",
            state.score(),
            state.lines_cleared(),
            state.level()
        ),
        format!("TIME {:02}:{:02}.{}", secs / 60, secs % 60, tenths),
        format!("NEXT {}", state.next_piece().kind.as_str()),
    ]
}
