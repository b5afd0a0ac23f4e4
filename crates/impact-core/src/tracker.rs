use crate::clock::{ClockTick, SimulationClock, SubscriptionId};
use crate::geo::GeoPoint;
use crate::host::{best_effort, EntityId, Viewer};
use crate::results::altitude_tint;
use crate::trajectory::Trajectory;
use glam::DVec3;

/// Keeps the camera trailing above and behind the falling body.
///
/// Subscribed to the logical clock from playback start until impact. A tick
/// with no trajectory position, or a camera call that fails, is skipped and
/// the next tick tries again.
#[derive(Clone, Debug)]
pub struct CameraTracker {
    offset: DVec3,
    subscription: Option<SubscriptionId>,
    follows: u32,
    skips: u32,
}

impl CameraTracker {
    pub fn new(offset: DVec3) -> Self {
        Self {
            offset,
            subscription: None,
            follows: 0,
            skips: 0,
        }
    }

    pub fn offset(&self) -> DVec3 {
        self.offset
    }

    /// Subscribe to clock ticks; a second call keeps the existing subscription.
    pub fn attach(&mut self, clock: &mut SimulationClock) -> SubscriptionId {
        if let Some(id) = self.subscription {
            return id;
        }
        let id = clock.subscribe();
        self.subscription = Some(id);
        id
    }

    /// Unsubscribe. Returns `true` only for the call that actually released it.
    pub fn detach(&mut self, clock: &mut SimulationClock) -> bool {
        match self.subscription.take() {
            Some(id) => clock.unsubscribe(id),
            None => false,
        }
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Ticks where the camera was re-aimed.
    pub fn follows(&self) -> u32 {
        self.follows
    }

    /// Ticks skipped for lack of a position or a failed camera call.
    pub fn skips(&self) -> u32 {
        self.skips
    }

    /// Re-aim at the body for this tick. Returns the body position when one was found.
    pub fn follow<V: Viewer>(
        &mut self,
        trajectory: &Trajectory,
        tick: &ClockTick,
        body: Option<EntityId>,
        viewer: &mut V,
    ) -> Option<DVec3> {
        let Some(position) = trajectory.position_at(tick.offset()) else {
            self.skips += 1;
            return None;
        };
        if let Some(body) = body {
            best_effort("move body", viewer.move_entity(body, position));
            let tint = altitude_tint(GeoPoint::from_cartesian(position).altitude);
            best_effort("tint body", viewer.tint_entity(body, tint));
        }
        match best_effort("look at body", viewer.look_at(position, self.offset)) {
            Some(()) => self.follows += 1,
            None => self.skips += 1,
        }
        Some(position)
    }
}
