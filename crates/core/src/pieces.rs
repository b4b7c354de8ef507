//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Implements the clockwise half of the Super Rotation System (SRS) with wall kick tables.
//! Shapes live in the SRS spawn boxes: I in a 4x4 box, O in the middle two columns of a
//! 4-wide box, J/L/S/T/Z in a 3x3 box. Kick offsets are stored in board coordinates
//! (y grows downward).
//! Reference: https://tetris.wiki/SRS

use crate::types::{Position, Rotation, TetrominoType};

/// Offset of a single block relative to piece origin
pub type BlockOffset = (i32, i32);

/// Shape of a piece - 4 block offsets from piece origin
pub type PieceShape = [BlockOffset; 4];

/// A piece type in a given rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: TetrominoType,
    pub rotation: Rotation,
}

impl Tetromino {
    /// Fresh piece in spawn orientation
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    pub fn with_rotation(kind: TetrominoType, rotation: Rotation) -> Self {
        Self { kind, rotation }
    }

    /// Same type, rotated 90° clockwise
    pub fn rotate(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation.rotate_cw(),
        }
    }

    /// The 4 block positions relative to the piece origin
    pub fn blocks(&self) -> [Position; 4] {
        get_shape(self.kind, self.rotation).map(|(x, y)| Position::new(x, y))
    }

    /// The 4 absolute block positions when the origin sits at `position`
    pub fn cells_at(&self, position: Position) -> [Position; 4] {
        self.blocks().map(|block| block + position)
    }
}

/// Get the shape (block offsets) for a piece type and rotation
pub fn get_shape(kind: TetrominoType, rotation: Rotation) -> PieceShape {
    match kind {
        TetrominoType::I => get_i_shape(rotation),
        TetrominoType::O => get_o_shape(rotation),
        TetrominoType::T => get_t_shape(rotation),
        TetrominoType::S => get_s_shape(rotation),
        TetrominoType::Z => get_z_shape(rotation),
        TetrominoType::J => get_j_shape(rotation),
        TetrominoType::L => get_l_shape(rotation),
    }
}

fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal on row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical in column 2
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal on row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical in column 1
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// SRS wall kick data, clockwise transitions only
///
/// Row index is the source rotation: 0 = 0->1, 1 = 1->2, 2 = 2->3, 3 = 3->0.
/// Entry 0 of every row is the in-place attempt.
pub type KickTable = [[BlockOffset; 5]; 4];

/// Get kick table for a piece type
pub fn get_kick_table(kind: TetrominoType) -> &'static KickTable {
    match kind {
        TetrominoType::O => &O_KICKS,
        TetrominoType::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// O piece never needs to move when rotating
const O_KICKS: KickTable = [[(0, 0); 5]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->2 (E->S)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 2->3 (S->W)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 3->0 (W->N)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table (wider than JLSTZ)
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Kick offsets tried, in order, when rotating clockwise out of `from`
pub fn kick_offsets(kind: TetrominoType, from: Rotation) -> &'static [BlockOffset; 5] {
    &get_kick_table(kind)[from.index() as usize]
}

/// Try to rotate a piece clockwise with wall kicks
///
/// `fits` decides whether a candidate placement is legal. Candidates are tried
/// in kick-table order; the first legal one wins.
/// Returns `Some((rotated_piece, new_position))`, or None if every kick fails.
pub fn rotate_with_kicks(
    piece: Tetromino,
    position: Position,
    fits: impl Fn(Tetromino, Position) -> bool,
) -> Option<(Tetromino, Position)> {
    let rotated = piece.rotate();

    kick_offsets(piece.kind, piece.rotation)
        .iter()
        .map(|&(dx, dy)| position + Position::new(dx, dy))
        .find(|&candidate| fits(rotated, candidate))
        .map(|candidate| (rotated, candidate))
}
