//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state transitions.
//! It has **zero dependencies** on rendering, timers, input devices or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is a plain function over values
//! - **Portable**: Runs headless, in a terminal, or behind any UI
//!
//! # Module Structure
//!
//! - [`board`]: Immutable board grid with row clearing
//! - [`pieces`]: Tetromino shapes and clockwise SRS wall kicks
//! - [`collision`]: Bounds and overlap checks
//! - [`rng`]: 7-bag piece generation
//! - [`game_state`]: Immutable game state (`Active` / `Finished`)
//! - [`movement`]: Move, rotate, hard drop, pause and resume
//! - [`lock`]: Lock, clear rows, score, spawn next, detect game over
//! - [`scoring`]: Line score table, levels, gravity curves
//! - [`ghost`]: Landing row projection
//! - [`feedback`]: Line-clear effect planning and the effect feed
//! - [`snapshot`]: Serializable persisted form of a game state
//!
//! # Example
//!
//! ```
//! use blockfall_core::{lock, movement, GameState, PieceGenerator};
//! use blockfall_types::Direction;
//!
//! let mut generator = PieceGenerator::new(12345);
//! let state = GameState::start(&mut generator);
//!
//! // Every action returns a brand new state (or None when it is not legal).
//! let state = movement::try_move(&state, Direction::Right).unwrap_or(state);
//! let state = movement::try_rotate(&state).unwrap_or(state);
//! let dropped = movement::hard_drop(&state).unwrap();
//!
//! let (next, event) = lock::lock(&dropped, &mut generator).unwrap();
//! assert_eq!(event.lines_cleared, 0);
//! assert!(!next.is_game_over());
//! ```

pub mod board;
pub mod collision;
pub mod feedback;
pub mod game_state;
pub mod ghost;
pub mod lock;
pub mod movement;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, fits};
pub use feedback::{
    plan_feedback, EffectEvent, Intensity, TextKey, VisualEffectBurst, VisualEffectFeed,
};
pub use game_state::{GameState, Play};
pub use ghost::ghost_y;
pub use lock::{lock, should_lock, LockEvent};
pub use pieces::{get_shape, rotate_with_kicks, Tetromino};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{fall_delay_ms, level_for_lines, score_for_lines};
pub use snapshot::{GameSnapshot, SnapshotError};
