//! Movement engine - translate, rotate, hard drop, pause and resume
//!
//! Every function takes the current state and returns `Some(new_state)` when the
//! action changes something, or `None` when it is not legal (game over, paused,
//! or the target placement collides). The input state is never modified.

use crate::collision::fits;
use crate::game_state::{GameState, Play};
use crate::ghost;
use crate::pieces::rotate_with_kicks;
use crate::types::{Direction, Position};

/// Shift the current piece one cell in `direction`
pub fn try_move(state: &GameState, direction: Direction) -> Option<GameState> {
    if !state.is_playable() {
        return None;
    }
    let Play::Active { piece, position } = state.play else {
        return None;
    };

    let target = position + direction.offset();
    fits(&state.board, &piece, target).then(|| state.with_piece(piece, target))
}

/// Rotate the current piece 90° clockwise, trying SRS kicks in order
pub fn try_rotate(state: &GameState) -> Option<GameState> {
    if !state.is_playable() {
        return None;
    }
    let Play::Active { piece, position } = state.play else {
        return None;
    };

    rotate_with_kicks(piece, position, |candidate, at| fits(&state.board, &candidate, at))
        .map(|(rotated, at)| state.with_piece(rotated, at))
}

/// Rows the current piece can fall before it rests
pub fn drop_distance(state: &GameState) -> Option<u32> {
    if !state.is_playable() {
        return None;
    }
    let Play::Active { piece, position } = state.play else {
        return None;
    };

    let landing = ghost::ghost_y(&state.board, &piece, position);
    Some((landing - position.y) as u32)
}

/// Move the current piece to its landing row without locking it
///
/// Succeeds even when the piece is already resting (distance 0).
pub fn hard_drop(state: &GameState) -> Option<GameState> {
    if !state.is_playable() {
        return None;
    }
    let Play::Active { piece, position } = state.play else {
        return None;
    };

    let landing = ghost::ghost_y(&state.board, &piece, position);
    Some(state.with_piece(piece, Position::new(position.x, landing)))
}

/// Freeze the game; None if already paused or over
pub fn pause(state: &GameState) -> Option<GameState> {
    if state.is_paused() || state.is_game_over() {
        return None;
    }
    Some(state.with_paused(true))
}

/// Unfreeze the game; None if not paused or over
pub fn resume(state: &GameState) -> Option<GameState> {
    if !state.is_paused() || state.is_game_over() {
        return None;
    }
    Some(state.with_paused(false))
}
