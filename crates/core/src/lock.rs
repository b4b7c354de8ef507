//! Lock / clear engine
//!
//! Locking merges the current piece into the board, removes complete rows, scores
//! them, promotes the next piece and draws a new one. If the promoted piece cannot
//! spawn, the state becomes `Finished`.

use crate::collision::collides;
use crate::game_state::{spawn, GameState, Play};
use crate::rng::PieceGenerator;
use crate::scoring::{level_for_lines, score_for_lines};
use crate::types::Direction;

/// Outcome of a single lock (consumed by the feedback planner and observers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub level_up: bool,
    pub game_over: bool,
}

/// True when the current piece cannot move down one more row
///
/// False when the game is over.
pub fn should_lock(state: &GameState) -> bool {
    match state.play {
        Play::Active { piece, position } => {
            collides(&state.board, &piece, position + Direction::Down.offset())
        }
        Play::Finished => false,
    }
}

/// Lock the current piece where it is
///
/// Returns None when the game is over or paused.
pub fn lock(state: &GameState, generator: &mut PieceGenerator) -> Option<(GameState, LockEvent)> {
    if state.is_paused() {
        return None;
    }
    let Play::Active { piece, position } = state.play else {
        return None;
    };

    let merged = state.board.lock_piece(&piece, position);
    let (board, cleared) = merged.clear_lines();

    let score_delta = score_for_lines(cleared);
    let lines_cleared = state.lines_cleared.saturating_add(cleared);
    let level_up = level_for_lines(lines_cleared) > state.level();

    let play = spawn(&board, state.next_piece);
    let next_piece = generator.next();
    let game_over = matches!(play, Play::Finished);

    let next = GameState {
        board,
        play,
        next_piece,
        score: state.score.saturating_add(score_delta),
        lines_cleared,
        paused: false,
    };
    let event = LockEvent {
        lines_cleared: cleared,
        score_delta,
        level_up,
        game_over,
    };
    Some((next, event))
}
