//! Ghost projection - where the current piece would land

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::Tetromino;
use crate::types::Position;

/// Lowest row the piece reaches by moving straight down from `position`
///
/// Returns `position.y` when the piece is already resting.
pub fn ghost_y(board: &Board, piece: &Tetromino, position: Position) -> i32 {
    let mut y = position.y;
    while y < board.height() && !collides(board, piece, Position::new(position.x, y + 1)) {
        y += 1;
    }
    y
}
