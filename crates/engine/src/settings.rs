//! Session settings
//!
//! Read from environment variables the same way the rest of the workspace reads its
//! configuration: every variable is optional and a value that fails to parse falls
//! back to the default.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BLOCKFALL_DIFFICULTY` | `normal` |
//! | `BLOCKFALL_SEED` | `1` |
//! | `BLOCKFALL_BOARD_WIDTH` | `10` |
//! | `BLOCKFALL_BOARD_HEIGHT` | `20` |

use blockfall_core::snapshot::MAX_BOARD_SIDE;
use blockfall_types::{Difficulty, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_FOOTPRINT};

/// Smallest accepted board height
pub const MIN_BOARD_HEIGHT: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub difficulty: Difficulty,
    pub board_width: i32,
    pub board_height: i32,
    pub seed: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            seed: 1,
        }
    }
}

impl GameSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (environment, config map, test fixture)
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let difficulty = get("BLOCKFALL_DIFFICULTY")
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or(defaults.difficulty);
        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let board_width = get("BLOCKFALL_BOARD_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&w| (SPAWN_FOOTPRINT..=MAX_BOARD_SIDE).contains(&w))
            .unwrap_or(defaults.board_width);
        let board_height = get("BLOCKFALL_BOARD_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&h| (MIN_BOARD_HEIGHT..=MAX_BOARD_SIDE).contains(&h))
            .unwrap_or(defaults.board_height);

        Self {
            difficulty,
            board_width,
            board_height,
            seed,
        }
    }

    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed, ..self }
    }

    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }
}
