//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the type of
//! the piece that was locked there. Storage is a flat row-major array for cache locality.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges 0..height
//! (top to bottom).
//!
//! Boards are immutable values: [`Board::lock_piece`] and [`Board::clear_lines`] return
//! new boards and leave the receiver untouched.

use crate::pieces::Tetromino;
use crate::types::{Cell, Position, TetrominoType, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_FOOTPRINT};

/// Largest accepted width or height
pub const MAX_BOARD_SIDE: i32 = 256;

/// The game board, flat array storage in row-major order (y * width + x)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board of the given size
    ///
    /// Each side is clamped to `0..=MAX_BOARD_SIDE`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, MAX_BOARD_SIDE);
        let height = height.clamp(0, MAX_BOARD_SIDE);
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    /// Build a board from its occupied cells
    ///
    /// Cells outside the grid are ignored.
    pub fn from_occupied(
        width: i32,
        height: i32,
        occupied: impl IntoIterator<Item = (Position, TetrominoType)>,
    ) -> Self {
        let mut board = Self::new(width, height);
        for (pos, kind) in occupied {
            board.set(pos, Some(kind));
        }
        board
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }

    fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a position is inside the grid
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Get cell at position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Copy of this board with one cell filled
    pub fn with_cell(&self, pos: Position, kind: TetrominoType) -> Self {
        let mut next = self.clone();
        next.set(pos, Some(kind));
        next
    }

    /// Copy of this board with an entire row filled
    pub fn with_row_filled(&self, y: i32, kind: TetrominoType) -> Self {
        let mut next = self.clone();
        for x in 0..self.width {
            next.set(Position::new(x, y), Some(kind));
        }
        next
    }

    /// Iterate over occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (Position, TetrominoType)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|kind| {
                let idx = idx as i32;
                (Position::new(idx % width, idx / width), kind)
            })
        })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height || self.width == 0 {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    fn row(&self, y: i32) -> &[Cell] {
        let start = (y * self.width) as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Spawn origin: horizontally centered for a 4-wide footprint, top row
    pub fn spawn_position(&self) -> Position {
        Position::new((self.width - SPAWN_FOOTPRINT) / 2, 0)
    }

    /// Merge a piece into the board at `position`
    ///
    /// Blocks that fall outside the grid are dropped.
    pub fn lock_piece(&self, piece: &Tetromino, position: Position) -> Self {
        let mut next = self.clone();
        for pos in piece.cells_at(position) {
            next.set(pos, Some(piece.kind));
        }
        next
    }

    /// Remove all full rows and collapse the rows above them
    ///
    /// Scans bottom to top with a write cursor; every surviving row moves down by the
    /// number of removed rows below it. Returns the new board and the number of rows
    /// removed.
    pub fn clear_lines(&self) -> (Self, u32) {
        let width = self.width as usize;
        let mut next = Self::new(self.width, self.height);
        let mut write_y = self.height;
        let mut cleared = 0u32;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            let dst = (write_y as usize) * width;
            next.cells[dst..dst + width].copy_from_slice(self.row(read_y));
        }

        (next, cleared)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(Position::new(0, 0)), Some(0));
        assert_eq!(board.index(Position::new(9, 0)), Some(9));
        assert_eq!(board.index(Position::new(0, 1)), Some(10));
        assert_eq!(board.index(Position::new(9, 19)), Some(199));
        assert_eq!(board.index(Position::new(-1, 0)), None);
        assert_eq!(board.index(Position::new(10, 0)), None);
        assert_eq!(board.index(Position::new(0, 20)), None);
        assert_eq!(board.index(Position::new(0, -1)), None);
    }

    #[test]
    fn test_with_cell_leaves_original_untouched() {
        let board = Board::default();
        let next = board.with_cell(Position::new(5, 10), TetrominoType::T);

        assert_eq!(board.get(Position::new(5, 10)), Some(None));
        assert_eq!(next.get(Position::new(5, 10)), Some(Some(TetrominoType::T)));
        assert_eq!(next.occupied_count(), 1);
    }

    #[test]
    fn test_occupied_iterates_positions() {
        let board = Board::default()
            .with_cell(Position::new(0, 0), TetrominoType::I)
            .with_cell(Position::new(7, 3), TetrominoType::Z);

        let cells: Vec<_> = board.occupied().collect();
        assert_eq!(
            cells,
            vec![
                (Position::new(0, 0), TetrominoType::I),
                (Position::new(7, 3), TetrominoType::Z)
            ]
        );
        assert_eq!(Board::from_occupied(10, 20, cells), board);
    }

    #[test]
    fn test_spawn_position_centers_footprint() {
        assert_eq!(Board::default().spawn_position(), Position::new(3, 0));
        assert_eq!(Board::new(12, 22).spawn_position(), Position::new(4, 0));
    }

    #[test]
    fn test_clear_lines_shifts_by_rows_below() {
        // Rows 17 and 19 are full; a marker at row 18 drops one row, a marker at
        // row 16 drops two.
        let board = Board::default()
            .with_row_filled(17, TetrominoType::I)
            .with_row_filled(19, TetrominoType::I)
            .with_cell(Position::new(2, 18), TetrominoType::T)
            .with_cell(Position::new(4, 16), TetrominoType::S);

        let (cleared, count) = board.clear_lines();
        assert_eq!(count, 2);
        assert_eq!(cleared.get(Position::new(2, 19)), Some(Some(TetrominoType::T)));
        assert_eq!(cleared.get(Position::new(4, 18)), Some(Some(TetrominoType::S)));
        assert_eq!(cleared.occupied_count(), 2);
    }

    #[test]
    fn test_oversized_board_is_clamped() {
        let board = Board::new(i32::MAX, 70_000);
        assert_eq!(board.width(), MAX_BOARD_SIDE);
        assert_eq!(board.height(), MAX_BOARD_SIDE);
        assert!(board.in_bounds(Position::new(255, 255)));
        assert!(!board.in_bounds(Position::new(256, 0)));
    }

    #[test]
    fn test_zero_width_board_has_no_full_rows() {
        let board = Board::new(0, 5);
        assert!(!board.is_row_full(0));
        assert_eq!(board.clear_lines().1, 0);
    }
}
