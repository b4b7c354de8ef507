//! Feedback planner - decides how loud a line clear should feel
//!
//! Pure data: the planner returns a description of effects (shake, floating text,
//! flash, particles). Rendering them is the presentation layer's job.

use arrayvec::ArrayVec;

/// How strong the effects of a clear are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intensity {
    Low,
    High,
}

/// Localizable label for the floating text of a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Single,
    Double,
    Triple,
    Tetris,
}

impl TextKey {
    /// Label for `lines` rows; None outside 1..=4
    pub fn for_lines(lines: u32) -> Option<Self> {
        match lines {
            1 => Some(TextKey::Single),
            2 => Some(TextKey::Double),
            3 => Some(TextKey::Triple),
            4 => Some(TextKey::Tetris),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextKey::Single => "single",
            TextKey::Double => "double",
            TextKey::Triple => "triple",
            TextKey::Tetris => "tetris",
        }
    }
}

/// One presentation effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectEvent {
    ScreenShake { intensity: Intensity, power: f32 },
    FloatingText { key: TextKey },
    ScreenFlash,
    Explosion { particle_count: u32 },
}

/// Everything a single clearing lock should trigger
#[derive(Debug, Clone, PartialEq)]
pub struct VisualEffectBurst {
    pub intensity: Intensity,
    /// Normalized strength in `0.0..=1.0`
    pub power: f32,
    pub lines_cleared: u32,
    /// Streak including this clear
    pub combo_streak: u32,
    pub events: ArrayVec<EffectEvent, 4>,
}

impl VisualEffectBurst {
    pub fn has_flash(&self) -> bool {
        self.events.iter().any(|e| matches!(e, EffectEvent::ScreenFlash))
    }

    pub fn particle_count(&self) -> Option<u32> {
        self.events.iter().find_map(|e| match e {
            EffectEvent::Explosion { particle_count } => Some(*particle_count),
            _ => None,
        })
    }
}

const BASE_PARTICLES: u32 = 24;
const PARTICLES_PER_POWER: f32 = 48.0;

fn base_power(lines: u32) -> f32 {
    match lines {
        1 => 0.30,
        2 => 0.45,
        3 => 0.75,
        _ => 1.00,
    }
}

fn combo_bonus(streak: u32) -> f32 {
    if streak < 2 {
        return 0.0;
    }
    (0.15 + (streak - 2) as f32 * 0.05).min(0.25)
}

/// Plan the effects for one lock
///
/// Returns the updated combo streak (reset to 0 by a lock that clears nothing) and
/// the burst to publish, if any. Lock events only ever clear 0..=4 rows; anything
/// larger is planned like a four-row clear.
pub fn plan_feedback(combo_streak: u32, lines_cleared: u32) -> (u32, Option<VisualEffectBurst>) {
    if lines_cleared == 0 {
        return (0, None);
    }

    let streak = combo_streak.saturating_add(1);
    let intensity = if lines_cleared >= 3 || streak >= 2 {
        Intensity::High
    } else {
        Intensity::Low
    };
    let power = (base_power(lines_cleared) + combo_bonus(streak)).min(1.0);
    let key = TextKey::for_lines(lines_cleared).unwrap_or(TextKey::Tetris);

    let mut events = ArrayVec::new();
    events.push(EffectEvent::ScreenShake { intensity, power });
    events.push(EffectEvent::FloatingText { key });
    if intensity == Intensity::High {
        events.push(EffectEvent::ScreenFlash);
        events.push(EffectEvent::Explosion {
            particle_count: BASE_PARTICLES + (PARTICLES_PER_POWER * power).floor() as u32,
        });
    }

    let burst = VisualEffectBurst {
        intensity,
        power,
        lines_cleared,
        combo_streak: streak,
        events,
    };
    (streak, Some(burst))
}

/// Single-slot, sequence-numbered effect feed
///
/// Publishing replaces any burst still pending; consumers acknowledge by sequence
/// id and no history is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualEffectFeed {
    sequence: u64,
    latest: Option<VisualEffectBurst>,
}

impl VisualEffectFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `burst` as the pending item and return its sequence id
    pub fn publish(&mut self, burst: VisualEffectBurst) -> u64 {
        self.sequence += 1;
        self.latest = Some(burst);
        self.sequence
    }

    /// The pending burst with its sequence id
    pub fn pending(&self) -> Option<(u64, &VisualEffectBurst)> {
        self.latest.as_ref().map(|burst| (self.sequence, burst))
    }

    /// Sequence id of the most recent publication (0 before the first)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Drop the pending burst if `sequence` still identifies it
    ///
    /// Stale ids (a newer burst has been published since) are ignored.
    pub fn acknowledge(&mut self, sequence: u64) -> bool {
        if self.latest.is_some() && sequence == self.sequence {
            self.latest = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lines_resets_streak() {
        assert_eq!(plan_feedback(4, 0), (0, None));
        assert_eq!(plan_feedback(0, 0), (0, None));
    }

    #[test]
    fn test_single_is_low() {
        let (streak, burst) = plan_feedback(0, 1);
        let burst = burst.unwrap();

        assert_eq!(streak, 1);
        assert_eq!(burst.intensity, Intensity::Low);
        assert!((burst.power - 0.30).abs() < 1e-6);
        assert_eq!(burst.events.len(), 2);
        assert!(matches!(burst.events[0], EffectEvent::ScreenShake { intensity: Intensity::Low, .. }));
        assert_eq!(burst.events[1], EffectEvent::FloatingText { key: TextKey::Single });
        assert!(!burst.has_flash());
        assert_eq!(burst.particle_count(), None);
    }

    #[test]
    fn test_combo_boosts_double_to_high() {
        let (streak, burst) = plan_feedback(2, 2);
        let burst = burst.unwrap();

        assert_eq!(streak, 3);
        assert_eq!(burst.intensity, Intensity::High);
        assert!((burst.power - 0.65).abs() < 1e-6);
        assert_eq!(burst.events.len(), 4);
        assert!(burst.has_flash());
        assert_eq!(burst.particle_count(), Some(24 + 31));
    }

    #[test]
    fn test_tetris_combo_clamps_power() {
        let (streak, burst) = plan_feedback(5, 4);
        let burst = burst.unwrap();

        assert_eq!(streak, 6);
        assert_eq!(burst.power, 1.0);
        assert_eq!(burst.particle_count(), Some(72));
        assert_eq!(burst.events[1], EffectEvent::FloatingText { key: TextKey::Tetris });
    }

    #[test]
    fn test_triple_is_high_without_combo() {
        let (_, burst) = plan_feedback(0, 3);
        let burst = burst.unwrap();
        assert_eq!(burst.intensity, Intensity::High);
        assert_eq!(burst.particle_count(), Some(24 + 36));
    }

    #[test]
    fn test_combo_bonus_curve() {
        assert_eq!(combo_bonus(0), 0.0);
        assert_eq!(combo_bonus(1), 0.0);
        assert!((combo_bonus(2) - 0.15).abs() < 1e-6);
        assert!((combo_bonus(3) - 0.20).abs() < 1e-6);
        assert!((combo_bonus(4) - 0.25).abs() < 1e-6);
        assert!((combo_bonus(40) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_feed_acknowledge_by_sequence() {
        let mut feed = VisualEffectFeed::new();
        assert!(feed.pending().is_none());

        let first = feed.publish(plan_feedback(0, 1).1.unwrap());
        let second = feed.publish(plan_feedback(1, 2).1.unwrap());
        assert_eq!((first, second), (1, 2));

        // Only the latest is retained
        let (seq, burst) = feed.pending().unwrap();
        assert_eq!(seq, 2);
        assert_eq!(burst.lines_cleared, 2);

        assert!(!feed.acknowledge(first));
        assert!(feed.pending().is_some());
        assert!(feed.acknowledge(second));
        assert!(feed.pending().is_none());
        assert!(!feed.acknowledge(second));
        assert_eq!(feed.sequence(), 2);
    }
}
