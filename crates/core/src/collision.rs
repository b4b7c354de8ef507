//! Collision checks between a piece placement and the board
//!
//! One uniform rule applies everywhere, including at spawn: every block must lie in
//! `[0, width) x [0, height)` and on an empty cell. Blocks above the board (`y < 0`)
//! are rejected like any other out-of-bounds block.

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::types::Position;

/// True if any block of `piece` at `position` is out of bounds or overlaps a locked cell
pub fn collides(board: &Board, piece: &Tetromino, position: Position) -> bool {
    piece
        .cells_at(position)
        .iter()
        .any(|&pos| !matches!(board.get(pos), Some(None)))
}

/// Negation of [`collides`]
pub fn fits(board: &Board, piece: &Tetromino, position: Position) -> bool {
    !collides(board, piece, position)
}
