//! Scoring module - line scores, level progression and gravity curves
//!
//! Scoring is flat: points depend only on how many rows a single lock cleared.
//! There is no level multiplier, no combo bonus and no drop bonus.

use crate::types::{Difficulty, LINES_PER_LEVEL, LINE_SCORES};

/// Points awarded for clearing `lines` rows with a single lock
///
/// 1 -> 100, 2 -> 300, 3 -> 500, 4 -> 800. Zero rows, or anything above 4, scores 0.
pub fn score_for_lines(lines: u32) -> u32 {
    LINE_SCORES.get(lines as usize).copied().unwrap_or(0)
}

/// Level reached after `total_lines` cleared rows (1-based)
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity curve parameters for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GravityCurve {
    /// Delay at level 1
    base_ms: u64,
    /// Reduction per level above 1
    step_ms: u64,
    /// Floor the delay never goes below
    min_ms: u64,
}

fn gravity_curve(difficulty: Difficulty) -> GravityCurve {
    match difficulty {
        Difficulty::Easy => GravityCurve {
            base_ms: 1000,
            step_ms: 75,
            min_ms: 150,
        },
        Difficulty::Normal => GravityCurve {
            base_ms: 800,
            step_ms: 70,
            min_ms: 100,
        },
        Difficulty::Hard => GravityCurve {
            base_ms: 550,
            step_ms: 50,
            min_ms: 80,
        },
    }
}

/// Milliseconds between gravity steps at `level`
///
/// Starts at the difficulty's base delay, shrinks linearly with each level and is
/// clamped to the difficulty's minimum. Level 0 is treated as level 1.
pub fn fall_delay_ms(level: u32, difficulty: Difficulty) -> u64 {
    let curve = gravity_curve(difficulty);
    let steps = u64::from(level.saturating_sub(1));
    curve
        .base_ms
        .saturating_sub(steps.saturating_mul(curve.step_ms))
        .max(curve.min_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(score_for_lines(0), 0);
        assert_eq!(score_for_lines(1), 100);
        assert_eq!(score_for_lines(2), 300);
        assert_eq!(score_for_lines(3), 500);
        assert_eq!(score_for_lines(4), 800);
        assert_eq!(score_for_lines(5), 0);
        assert_eq!(score_for_lines(u32::MAX), 0);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(19), 2);
        assert_eq!(level_for_lines(20), 3);
    }

    #[test]
    fn test_fall_delay_decreases_then_clamps() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let mut previous = fall_delay_ms(1, difficulty);
            for level in 2..40 {
                let delay = fall_delay_ms(level, difficulty);
                assert!(delay <= previous, "{:?} level {}", difficulty, level);
                previous = delay;
            }
            assert_eq!(fall_delay_ms(1000, difficulty), gravity_curve(difficulty).min_ms);
        }
    }

    #[test]
    fn test_fall_delay_values() {
        assert_eq!(fall_delay_ms(1, Difficulty::Normal), 800);
        assert_eq!(fall_delay_ms(0, Difficulty::Normal), 800);
        assert_eq!(fall_delay_ms(2, Difficulty::Normal), 730);
        assert_eq!(fall_delay_ms(1, Difficulty::Easy), 1000);
        assert_eq!(fall_delay_ms(1, Difficulty::Hard), 550);
        assert_eq!(fall_delay_ms(11, Difficulty::Hard), 80);
    }

    #[test]
    fn test_harder_is_never_slower() {
        for level in 1..30 {
            assert!(fall_delay_ms(level, Difficulty::Hard) <= fall_delay_ms(level, Difficulty::Normal));
            assert!(fall_delay_ms(level, Difficulty::Normal) <= fall_delay_ms(level, Difficulty::Easy));
        }
    }
}
