//! Feedback tests - effect planning and the effect feed

use blockfall::core::{plan_feedback, EffectEvent, Intensity, TextKey, VisualEffectFeed};

#[test]
fn test_single_clear_is_low() {
    let (streak, burst) = plan_feedback(0, 1);
    let burst = burst.unwrap();
    assert_eq!(streak, 1);
    assert_eq!(burst.intensity, Intensity::Low);
    assert!((burst.power - 0.30).abs() < 1e-6);
    assert_eq!(burst.events.len(), 2);
    assert!(matches!(
        burst.events[0],
        EffectEvent::ScreenShake {
            intensity: Intensity::Low,
            ..
        }
    ));
    assert_eq!(burst.events[1], EffectEvent::FloatingText { key: TextKey::Single });
    assert!(!burst.has_flash());
    assert_eq!(burst.particle_count(), None);
}

#[test]
fn test_combo_boosts_double() {
    let (streak, burst) = plan_feedback(2, 2);
    let burst = burst.unwrap();
    assert_eq!(streak, 3);
    assert_eq!(burst.intensity, Intensity::High);
    assert!(burst.has_flash());
    assert!(burst.particle_count().is_some());
}

#[test]
fn test_long_combo_tetris_is_clamped() {
    let (_, burst) = plan_feedback(5, 4);
    let burst = burst.unwrap();
    assert_eq!(burst.power, 1.0);
    assert_eq!(burst.particle_count(), Some(72));
    assert_eq!(burst.events.len(), 4);
}

#[test]
fn test_miss_resets_streak() {
    assert_eq!(plan_feedback(4, 0), (0, None));
}

#[test]
fn test_feed_keeps_only_latest() {
    let mut feed = VisualEffectFeed::new();
    let first = feed.publish(plan_feedback(0, 1).1.unwrap());
    let second = feed.publish(plan_feedback(1, 3).1.unwrap());
    assert_eq!(second, first + 1);

    // Stale acknowledgement is ignored
    assert!(!feed.acknowledge(first));
    let (seq, burst) = feed.pending().unwrap();
    assert_eq!(seq, second);
    assert_eq!(burst.lines_cleared, 3);

    assert!(feed.acknowledge(second));
    assert!(feed.pending().is_none());
    assert!(!feed.acknowledge(second));
}
