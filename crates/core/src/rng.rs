//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern falling-block games.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! The generator is an owned value threaded through a session; there is no global
//! RNG. A simple LCG keeps sequences reproducible from a seed.

use std::collections::VecDeque;

use crate::pieces::Tetromino;
use crate::types::TetrominoType;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    ///
    /// Seed 0 is mapped to 1 so that seeds are 1-based like the settings default.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Resume from a raw state taken with [`SimpleRng::state`]
    ///
    /// Every `u32` is a valid state, 0 included.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceGenerator {
    /// Types left in the current bag, front is drawn next
    bag: VecDeque<TetrominoType>,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    ///
    /// The bag starts empty, so the first draw shuffles a fresh one.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: VecDeque::with_capacity(TetrominoType::ALL.len()),
            rng: SimpleRng::new(seed),
        }
    }

    /// Rebuild a generator from persisted parts
    ///
    /// `bag` is the remaining (undrawn) part of the current bag.
    pub fn from_parts(rng_state: u32, bag: impl IntoIterator<Item = TetrominoType>) -> Self {
        Self {
            bag: bag.into_iter().collect(),
            rng: SimpleRng::from_state(rng_state),
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        let mut fresh = TetrominoType::ALL;
        self.rng.shuffle(&mut fresh);
        self.bag.extend(fresh);
    }

    /// Draw the next piece, at rotation 0
    pub fn next(&mut self) -> Tetromino {
        if self.bag.is_empty() {
            self.refill_bag();
        }

        // The bag was just refilled if it was empty, so front always exists.
        let kind = self.bag.pop_front().unwrap_or(TetrominoType::I);
        Tetromino::new(kind)
    }

    /// Peek at the next type without drawing it
    ///
    /// Previews the next bag without touching the main RNG when the current bag is empty,
    /// so the preview always matches the following `next()`.
    pub fn peek(&self) -> TetrominoType {
        if let Some(&kind) = self.bag.front() {
            return kind;
        }

        let mut preview_rng = self.rng.clone();
        let mut next_bag = TetrominoType::ALL;
        preview_rng.shuffle(&mut next_bag);
        next_bag[0]
    }

    /// Drop the rest of the current bag; the next draw starts a fresh shuffle
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Undrawn types in the current bag, in draw order
    pub fn remaining(&self) -> impl Iterator<Item = TetrominoType> + '_ {
        self.bag.iter().copied()
    }

    /// Current RNG state (enough, with `remaining()`, to resume the sequence)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
