//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain values with no external dependencies, so they can be used
//! by the rules engine, the session loop, the gesture interpreter and any
//! presentation layer alike.
//!
//! # Coordinates
//!
//! - **x** grows to the right, **y** grows downward
//! - `y < 0` is above the visible board (spawn buffer)
//! - Default board: 10 columns x 20 rows, spawn at (3, 0)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CLOCK_TICK_MS` | 100 | Cadence of the elapsed-time clock |
//! | `HARD_DROP_MAX_GESTURE_MS` | 500 | Longest drag still treated as a flick |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, Position, Rotation, TetrominoType};
//!
//! let kind = TetrominoType::from_str("t").unwrap();
//! assert_eq!(kind, TetrominoType::T);
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Position::new(1, 2) + Position::new(3, 4), Position::new(4, 6));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! ```

use std::ops::{Add, Sub};

/// Default board width in cells
pub const BOARD_WIDTH: i32 = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: i32 = 20;

/// Width of the spawn footprint used to center new pieces
pub const SPAWN_FOOTPRINT: i32 = 4;

/// Cadence of the elapsed-time clock tick (milliseconds)
pub const CLOCK_TICK_MS: u64 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear score table, indexed by rows cleared in one lock
///
/// Anything above 4 rows scores 0.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Horizontal drag distance (px) that triggers one sideways move
pub const DRAG_STEP_PX: f32 = 50.0;

/// A drag is horizontal when `|dx| > HORIZONTAL_BIAS * |dy|`
pub const HORIZONTAL_BIAS: f32 = 1.5;

/// Fraction of the board's pixel height a quick downward drag must cover to hard drop
pub const HARD_DROP_HEIGHT_FRACTION: f32 = 0.25;

/// Maximum duration of a downward drag that still counts as a hard-drop flick
pub const HARD_DROP_MAX_GESTURE_MS: u64 = 500;

/// Integer board coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ZERO: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Self::Output {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Self::Output {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The seven tetromino types
///
/// - **I**: horizontal bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoType {
    /// All seven types in canonical order
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    /// Parse a type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::TetrominoType;
    ///
    /// assert_eq!(TetrominoType::from_str("i"), Some(TetrominoType::I));
    /// assert_eq!(TetrominoType::from_str("O"), Some(TetrominoType::O));
    /// assert_eq!(TetrominoType::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TetrominoType::I),
            "o" => Some(TetrominoType::O),
            "t" => Some(TetrominoType::T),
            "s" => Some(TetrominoType::S),
            "z" => Some(TetrominoType::Z),
            "j" => Some(TetrominoType::J),
            "l" => Some(TetrominoType::L),
            _ => None,
        }
    }

    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TetrominoType::I => "i",
            TetrominoType::O => "o",
            TetrominoType::T => "t",
            TetrominoType::S => "s",
            TetrominoType::Z => "z",
            TetrominoType::J => "j",
            TetrominoType::L => "l",
        }
    }
}

/// Rotation states (North = spawn orientation), clockwise order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (rotation + 1 mod 4)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Numeric rotation index in `0..4`
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any integer, wrapping modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" => Some(Rotation::North),
            "east" => Some(Rotation::East),
            "south" => Some(Rotation::South),
            "west" => Some(Rotation::West),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Translation directions accepted by the movement engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Unit offset for one step in this direction
    pub fn offset(&self) -> Position {
        match self {
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
            Direction::Down => Position::new(0, 1),
        }
    }
}

/// Discrete game actions
///
/// Produced by keyboard bindings, the gesture interpreter, or scripted players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Freeze the game
    Pause,
    /// Unfreeze the game
    Resume,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            _ => None,
        }
    }

    /// camelCase string form
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
        }
    }
}

/// Difficulty selects the gravity curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// A cell on the board
///
/// - `None`: empty
/// - `Some(TetrominoType)`: filled by a locked block of that type
pub type Cell = Option<TetrominoType>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_defaults() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(CLOCK_TICK_MS, 100);
    }

    #[test]
    fn test_position_arithmetic() {
        let a = Position::new(3, -1);
        let b = Position::new(-2, 5);
        assert_eq!(a + b, Position::new(1, 4));
        assert_eq!(a - b, Position::new(5, -6));
        assert_eq!(a + Position::ZERO, a);
    }

    #[test]
    fn test_rotation_cycle() {
        let mut r = Rotation::North;
        for i in 0..4u8 {
            assert_eq!(r.index(), i);
            assert_eq!(Rotation::from_index(i), r);
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::North);
        assert_eq!(Rotation::from_index(6), Rotation::South);
    }

    #[test]
    fn test_string_forms() {
        for kind in TetrominoType::ALL {
            assert_eq!(TetrominoType::from_str(kind.as_str()), Some(kind));
        }
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::Rotate,
            GameAction::HardDrop,
            GameAction::Pause,
            GameAction::Resume,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
        assert_eq!(Difficulty::from_str(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), Position::new(-1, 0));
        assert_eq!(Direction::Right.offset(), Position::new(1, 0));
        assert_eq!(Direction::Down.offset(), Position::new(0, 1));
    }
}
