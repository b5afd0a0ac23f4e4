//! Logical animation clock, independent from wall-clock time.
//!
//! Instants are seconds on the animation's own axis. The clock only moves
//! when playback is enabled; the host advances it once per rendered frame
//! and receives a [`ClockTick`] to fan out to subscribers.

use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClockRange {
    /// Time runs past stop.
    Unbounded,
    /// Time is held inside [start, stop].
    #[default]
    Clamped,
}

/// One frame's view of the clock, handed to every tick subscriber.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockTick {
    pub start: f64,
    pub current: f64,
    pub stop: f64,
}

impl ClockTick {
    /// Seconds elapsed since the start instant.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.current - self.start
    }

    #[inline]
    pub fn reached_stop(&self) -> bool {
        self.current >= self.stop
    }
}

#[derive(Clone, Debug)]
pub struct SimulationClock {
    start: f64,
    current: f64,
    stop: f64,
    range: ClockRange,
    multiplier: f64,
    animating: bool,
    subscribers: SmallVec<[SubscriptionId; 2]>,
    next_subscription: u64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            start: 0.0,
            current: 0.0,
            stop: 0.0,
            range: ClockRange::Clamped,
            multiplier: 1.0,
            animating: false,
            subscribers: SmallVec::new(),
            next_subscription: 0,
        }
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set up a clamped, real-time timeline of `duration` seconds from `start`.
    /// Playback stays disabled until [`SimulationClock::set_animating`].
    pub fn configure(&mut self, start: f64, duration: f64) {
        self.start = start;
        self.current = start;
        self.stop = start + duration;
        self.range = ClockRange::Clamped;
        self.multiplier = 1.0;
        self.animating = false;
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn range(&self) -> ClockRange {
        self.range
    }

    pub fn set_range(&mut self, range: ClockRange) {
        self.range = range;
        self.current = self.clamp(self.current);
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.multiplier = multiplier;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    pub fn set_current(&mut self, instant: f64) {
        self.current = self.clamp(instant);
    }

    fn clamp(&self, instant: f64) -> f64 {
        match self.range {
            ClockRange::Clamped => instant.clamp(self.start, self.stop.max(self.start)),
            ClockRange::Unbounded => instant,
        }
    }

    pub fn tick_view(&self) -> ClockTick {
        ClockTick {
            start: self.start,
            current: self.current,
            stop: self.stop,
        }
    }

    /// Move the clock forward by one frame's wall-clock delta.
    ///
    /// Returns the tick to deliver, or `None` while playback is disabled.
    pub fn advance(&mut self, elapsed: Duration) -> Option<ClockTick> {
        if !self.animating {
            return None;
        }
        self.current = self.clamp(self.current + elapsed.as_secs_f64() * self.multiplier);
        Some(self.tick_view())
    }

    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push(id);
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.subscribers.iter().position(|s| *s == id) {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains(&id)
    }

    pub fn subscribers(&self) -> &[SubscriptionId] {
        &self.subscribers
    }

    /// Drop every subscription and pause playback.
    pub fn reset(&mut self) {
        self.subscribers.clear();
        self.animating = false;
    }
}
