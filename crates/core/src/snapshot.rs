//! Persisted form of a game state
//!
//! [`GameSnapshot`] is a plain serde value: board size, occupied cells, the piece in
//! play, counters and flags, and optionally the generator state needed to continue
//! the same piece sequence. Piece and rotation names are lowercase on the wire.
//!
//! Restoring validates the snapshot; a restored state is valid input to every rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::collision::collides;
use crate::game_state::{GameState, Play};
use crate::pieces::Tetromino;
use crate::rng::PieceGenerator;
use crate::types::{Position, Rotation, TetrominoType};

pub use crate::board::MAX_BOARD_SIDE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("invalid board dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("cell ({x}, {y}) is outside the board")]
    CellOutOfBounds { x: i32, y: i32 },
    #[error("cell ({x}, {y}) is listed twice")]
    DuplicateCell { x: i32, y: i32 },
    #[error("current piece overlaps the board or leaves it")]
    OverlappingPiece,
    #[error("game_over is {game_over} but has_piece is {has_piece}")]
    InconsistentPlay { game_over: bool, has_piece: bool },
    #[error("generator bag is not a subset of one bag: {0:?}")]
    InvalidBag(Vec<PieceKindLower>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKindLower {
    #[serde(rename = "i")]
    I,
    #[serde(rename = "o")]
    O,
    #[serde(rename = "t")]
    T,
    #[serde(rename = "s")]
    S,
    #[serde(rename = "z")]
    Z,
    #[serde(rename = "j")]
    J,
    #[serde(rename = "l")]
    L,
}

impl From<TetrominoType> for PieceKindLower {
    fn from(value: TetrominoType) -> Self {
        match value {
            TetrominoType::I => Self::I,
            TetrominoType::O => Self::O,
            TetrominoType::T => Self::T,
            TetrominoType::S => Self::S,
            TetrominoType::Z => Self::Z,
            TetrominoType::J => Self::J,
            TetrominoType::L => Self::L,
        }
    }
}

impl From<PieceKindLower> for TetrominoType {
    fn from(value: PieceKindLower) -> Self {
        match value {
            PieceKindLower::I => Self::I,
            PieceKindLower::O => Self::O,
            PieceKindLower::T => Self::T,
            PieceKindLower::S => Self::S,
            PieceKindLower::Z => Self::Z,
            PieceKindLower::J => Self::J,
            PieceKindLower::L => Self::L,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationLower {
    #[serde(rename = "north")]
    North,
    #[serde(rename = "east")]
    East,
    #[serde(rename = "south")]
    South,
    #[serde(rename = "west")]
    West,
}

impl From<Rotation> for RotationLower {
    fn from(value: Rotation) -> Self {
        match value {
            Rotation::North => Self::North,
            Rotation::East => Self::East,
            Rotation::South => Self::South,
            Rotation::West => Self::West,
        }
    }
}

impl From<RotationLower> for Rotation {
    fn from(value: RotationLower) -> Self {
        match value {
            RotationLower::North => Self::North,
            RotationLower::East => Self::East,
            RotationLower::South => Self::South,
            RotationLower::West => Self::West,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub x: i32,
    pub y: i32,
    pub kind: PieceKindLower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKindLower,
    pub rotation: RotationLower,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorSnapshot {
    #[serde(rename = "rng_state")]
    pub rng_state: u32,
    /// Undrawn part of the current bag, in draw order
    pub bag: Vec<PieceKindLower>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<CellSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<ActiveSnapshot>,
    pub next: PieceKindLower,
    pub score: u32,
    pub lines: u32,
    /// Derived from `lines`; informational only, ignored on restore
    pub level: u32,
    pub paused: bool,
    #[serde(rename = "game_over")]
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorSnapshot>,
}

impl GameSnapshot {
    /// Capture `state`, plus `generator` when the piece sequence should resume too
    pub fn capture(state: &GameState, generator: Option<&PieceGenerator>) -> Self {
        let board = state.board();
        let current = match state.play() {
            Play::Active { piece, position } => Some(ActiveSnapshot {
                kind: piece.kind.into(),
                rotation: piece.rotation.into(),
                x: position.x,
                y: position.y,
            }),
            Play::Finished => None,
        };

        Self {
            width: board.width(),
            height: board.height(),
            cells: board
                .occupied()
                .map(|(pos, kind)| CellSnapshot {
                    x: pos.x,
                    y: pos.y,
                    kind: kind.into(),
                })
                .collect(),
            current,
            next: state.next_piece().kind.into(),
            score: state.score(),
            lines: state.lines_cleared(),
            level: state.level(),
            paused: state.is_paused(),
            game_over: state.is_game_over(),
            generator: generator.map(|g| GeneratorSnapshot {
                rng_state: g.rng_state(),
                bag: g.remaining().map(Into::into).collect(),
            }),
        }
    }

    /// Rebuild and validate the game state
    pub fn restore(&self) -> Result<GameState, SnapshotError> {
        if self.width <= 0
            || self.height <= 0
            || self.width > MAX_BOARD_SIDE
            || self.height > MAX_BOARD_SIDE
        {
            return Err(SnapshotError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let empty = Board::new(self.width, self.height);
        let mut seen = vec![false; (self.width * self.height) as usize];
        for cell in &self.cells {
            if !empty.in_bounds(Position::new(cell.x, cell.y)) {
                return Err(SnapshotError::CellOutOfBounds { x: cell.x, y: cell.y });
            }
            let idx = (cell.y * self.width + cell.x) as usize;
            if seen[idx] {
                return Err(SnapshotError::DuplicateCell { x: cell.x, y: cell.y });
            }
            seen[idx] = true;
        }
        let board = Board::from_occupied(
            self.width,
            self.height,
            self.cells
                .iter()
                .map(|cell| (Position::new(cell.x, cell.y), cell.kind.into())),
        );

        let play = match (self.current, self.game_over) {
            (Some(active), false) => {
                let piece = Tetromino::with_rotation(active.kind.into(), active.rotation.into());
                let position = Position::new(active.x, active.y);
                if collides(&board, &piece, position) {
                    return Err(SnapshotError::OverlappingPiece);
                }
                Play::Active { piece, position }
            }
            (None, true) => Play::Finished,
            (current, game_over) => {
                return Err(SnapshotError::InconsistentPlay {
                    game_over,
                    has_piece: current.is_some(),
                })
            }
        };

        Ok(GameState::from_parts(
            board,
            play,
            Tetromino::new(self.next.into()),
            self.score,
            self.lines,
            self.paused && !self.game_over,
        ))
    }

    /// Rebuild the generator, if one was captured
    pub fn restore_generator(&self) -> Result<Option<PieceGenerator>, SnapshotError> {
        let Some(saved) = &self.generator else {
            return Ok(None);
        };

        let mut seen = [false; 7];
        for kind in &saved.bag {
            let idx = *kind as usize;
            if seen[idx] {
                return Err(SnapshotError::InvalidBag(saved.bag.clone()));
            }
            seen[idx] = true;
        }

        Ok(Some(PieceGenerator::from_parts(
            saved.rng_state,
            saved.bag.iter().map(|&k| TetrominoType::from(k)),
        )))
    }
}

impl GameState {
    /// Persisted form of this state (without generator)
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self, None)
    }
}
