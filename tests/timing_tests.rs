// Logical clock and wall-clock timer queue behavior.

use impact_core::*;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn configured_clock_is_clamped_real_time_and_paused() {
    let mut clock = SimulationClock::new();
    clock.set_multiplier(4.0);
    clock.set_animating(true);
    clock.configure(100.0, 10.0);

    assert_eq!(clock.start(), 100.0);
    assert_eq!(clock.current(), 100.0);
    assert_eq!(clock.stop(), 110.0);
    assert_eq!(clock.range(), ClockRange::Clamped);
    assert_eq!(clock.multiplier(), 1.0);
    assert!(!clock.is_animating());
    assert_eq!(clock.advance(ms(500)), None, "paused clock must not tick");
    assert_eq!(clock.current(), 100.0);
}

#[test]
fn clamped_clock_holds_at_stop() {
    let mut clock = SimulationClock::new();
    clock.configure(0.0, 1.0);
    clock.set_animating(true);

    let tick = clock.advance(ms(750)).unwrap();
    assert_eq!(tick.offset(), 0.75);
    assert!(!tick.reached_stop());

    let tick = clock.advance(ms(750)).unwrap();
    assert_eq!(tick.current, 1.0);
    assert!(tick.reached_stop());

    let tick = clock.advance(ms(750)).unwrap();
    assert_eq!(tick.current, 1.0, "clamped clock ran past stop");
    assert!(tick.reached_stop());
}

#[test]
fn unbounded_clock_runs_past_stop() {
    let mut clock = SimulationClock::new();
    clock.configure(0.0, 1.0);
    clock.set_range(ClockRange::Unbounded);
    clock.set_animating(true);
    clock.advance(ms(1_500));
    assert_eq!(clock.current(), 1.5);
}

#[test]
fn multiplier_scales_logical_time() {
    let mut clock = SimulationClock::new();
    clock.configure(0.0, 10.0);
    clock.set_multiplier(2.0);
    clock.set_animating(true);
    let tick = clock.advance(ms(250)).unwrap();
    assert_eq!(tick.current, 0.5);
}

#[test]
fn set_current_respects_the_range() {
    let mut clock = SimulationClock::new();
    clock.configure(5.0, 10.0);
    clock.set_current(-3.0);
    assert_eq!(clock.current(), 5.0);
    clock.set_current(99.0);
    assert_eq!(clock.current(), 15.0);
    clock.set_current(7.5);
    assert_eq!(clock.current(), 7.5);
}

#[test]
fn subscriptions_are_tracked_individually() {
    let mut clock = SimulationClock::new();
    let a = clock.subscribe();
    let b = clock.subscribe();
    assert_ne!(a, b);
    assert_eq!(clock.subscribers(), &[a, b]);

    assert!(clock.unsubscribe(a));
    assert!(!clock.unsubscribe(a), "second unsubscribe must report nothing removed");
    assert!(!clock.is_subscribed(a));
    assert!(clock.is_subscribed(b));

    clock.set_animating(true);
    clock.reset();
    assert!(clock.subscribers().is_empty());
    assert!(!clock.is_animating());
}

#[test]
fn tracker_attach_and_detach_are_idempotent() {
    let mut clock = SimulationClock::new();
    let mut tracker = CameraTracker::new(glam::DVec3::new(0.0, -20_000.0, 7_000.0));

    let first = tracker.attach(&mut clock);
    let second = tracker.attach(&mut clock);
    assert_eq!(first, second);
    assert_eq!(clock.subscribers().len(), 1);

    assert!(tracker.detach(&mut clock));
    assert!(!tracker.detach(&mut clock));
    assert!(clock.subscribers().is_empty());
    assert!(!tracker.is_attached());
}

#[test]
fn one_shot_timer_fires_once_when_due() {
    let mut queue = TimerQueue::new();
    let id = queue.schedule_once(ms(300));

    queue.advance(ms(299));
    assert_eq!(queue.next_due(), None);

    queue.advance(ms(1));
    assert_eq!(queue.next_due(), Some(TimerFired { id, due: ms(300) }));
    assert_eq!(queue.next_due(), None);
    assert_eq!(queue.pending(), 0);
    assert!(!queue.cancel(id), "fired one-shot timers cannot be cancelled");
}

#[test]
fn repeating_timer_catches_up_one_fire_at_a_time() {
    let mut queue = TimerQueue::new();
    let id = queue.schedule_repeating(ms(60));

    queue.advance(ms(200));
    let fires: Vec<_> = std::iter::from_fn(|| queue.next_due()).collect();
    assert_eq!(
        fires,
        vec![
            TimerFired { id, due: ms(60) },
            TimerFired { id, due: ms(120) },
            TimerFired { id, due: ms(180) },
        ]
    );
    assert!(queue.is_pending(id));
}

#[test]
fn cancel_during_a_burst_suppresses_later_fires() {
    let mut queue = TimerQueue::new();
    let id = queue.schedule_repeating(ms(60));
    queue.advance(ms(500));

    assert!(queue.next_due().is_some());
    assert!(queue.cancel(id));
    assert_eq!(queue.next_due(), None);
    assert!(!queue.cancel(id));
}

#[test]
fn fires_come_out_in_due_order() {
    let mut queue = TimerQueue::new();
    let flash = queue.schedule_once(ms(300));
    let shake = queue.schedule_repeating(ms(60));
    queue.advance(ms(300));

    let order: Vec<_> = std::iter::from_fn(|| queue.next_due()).map(|f| f.id).collect();
    // ties break on the older timer
    assert_eq!(order, vec![shake, shake, shake, shake, flash, shake]);
}

#[test]
fn zero_interval_repeats_are_floored() {
    let mut queue = TimerQueue::new();
    queue.schedule_repeating(Duration::ZERO);
    queue.advance(ms(3));
    assert_eq!(std::iter::from_fn(|| queue.next_due()).count(), 3);
}
