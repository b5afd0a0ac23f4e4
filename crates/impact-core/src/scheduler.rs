//! Wall-clock timers behind one abstraction.
//!
//! Flash expiry and shake cadence both run on wall-clock time. Components
//! only ever schedule and cancel; the host advances time and pops due fires
//! one at a time, so a cancel issued while handling a fire suppresses any
//! further fires of that timer in the same frame.

use fnv::FnvHashMap;
use std::time::Duration;

// Repeating timers never fire faster than this.
const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFired {
    pub id: TimerId,
    /// Wall-clock instant the fire was due at.
    pub due: Duration,
}

pub trait Scheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerId;
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;
    /// Returns `false` when the timer already fired (one-shot) or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;
    /// Wall-clock time since the scheduler was created.
    fn now(&self) -> Duration;
    fn advance(&mut self, elapsed: Duration);
    /// Pop the earliest fire due at or before `now`.
    fn next_due(&mut self) -> Option<TimerFired>;
    fn pending(&self) -> usize;
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: Duration,
    interval: Option<Duration>,
}

/// Deterministic timer table driven by explicit `advance` calls.
///
/// The native loop feeds it measured frame deltas; tests feed it exact ones.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    timers: FnvHashMap<TimerId, Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, timer);
        id
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let due = self.now + delay;
        self.insert(Timer {
            due,
            interval: None,
        })
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let interval = interval.max(MIN_REPEAT_INTERVAL);
        let due = self.now + interval;
        self.insert(Timer {
            due,
            interval: Some(interval),
        })
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    fn now(&self) -> Duration {
        self.now
    }

    fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    fn next_due(&mut self) -> Option<TimerFired> {
        let (id, due) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= self.now)
            .map(|(id, t)| (*id, t.due))
            .min_by_key(|(id, due)| (*due, *id))?;
        match self.timers.get_mut(&id) {
            Some(timer) => match timer.interval {
                Some(interval) => timer.due += interval,
                None => {
                    self.timers.remove(&id);
                }
            },
            None => return None,
        }
        Some(TimerFired { id, due })
    }

    fn pending(&self) -> usize {
        self.timers.len()
    }
}
