//! One impact animation run and the sequencer that walks it through
//! `Approaching -> Tracking -> Impacted`.
//!
//! All mutable run state lives here as named fields. The host delivers
//! flight completions, clock ticks and timer fires; each is matched against
//! the ids this session handed out, so events from an older session fall
//! through as unhandled.

use crate::clock::{ClockTick, SimulationClock, SubscriptionId};
use crate::config::AnimationConfig;
use crate::constants::{BODY_TRAIL_GLOW, BODY_TRAIL_WIDTH, ORANGE};
use crate::effects::{EffectsPhase, ImpactEffectParams, ImpactEffects};
use crate::error::TrajectoryError;
use crate::geo::GeoPoint;
use crate::host::{
    best_effort, EntityId, EntitySpec, FlightId, FlyTo, Orientation, TrailStyle, Viewer,
};
use crate::scheduler::{Scheduler, TimerFired};
use crate::tracker::CameraTracker;
use crate::trajectory::{Trajectory, TrajectoryGenerator};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Approaching,
    Tracking,
    Impacted,
    /// Final framing shot issued; no callbacks left.
    Settled,
}

#[derive(Debug)]
enum Stage {
    Approaching { flight: Option<FlightId> },
    Tracking,
    Impacted(ImpactEffects),
}

#[derive(Debug)]
pub struct AnimationSession {
    id: u64,
    config: AnimationConfig,
    entry: GeoPoint,
    impact: GeoPoint,
    duration: f64,
    start: f64,
    stop: f64,
    trajectory: Trajectory,
    impacted: bool,
    tracker: CameraTracker,
    stage: Stage,
    body: Option<EntityId>,
    entities: Vec<EntityId>,
    seed: u64,
}

impl AnimationSession {
    /// Build the trajectory for a fall onto `site` starting at logical instant `start`.
    pub fn new(
        id: u64,
        site: GeoPoint,
        config: &AnimationConfig,
        start: f64,
        seed: u64,
    ) -> Result<Self, TrajectoryError> {
        let impact = site.with_altitude(0.0);
        let [d_lon, d_lat, entry_altitude] = config.entry_offset;
        let entry = impact.offset(d_lon, d_lat, entry_altitude);
        let duration = config.fall_duration_sec;
        let trajectory =
            TrajectoryGenerator::new(config.sample_step_sec)?.generate(entry, impact, duration)?;
        Ok(Self {
            id,
            config: config.clone(),
            entry,
            impact,
            duration,
            start,
            stop: start + duration,
            trajectory,
            impacted: false,
            tracker: CameraTracker::new(config.tracking_offset),
            stage: Stage::Approaching { flight: None },
            body: None,
            entities: Vec::new(),
            seed,
        })
    }

    /// Spawn the body, arm the clock (paused) and fly to the vantage point.
    pub fn begin<V: Viewer>(&mut self, viewer: &mut V, clock: &mut SimulationClock) {
        clock.configure(self.start, self.duration);
        if let Some(position) = self.trajectory.start_position() {
            let body = viewer.add_entity(EntitySpec::Body {
                position,
                trail: TrailStyle {
                    width: BODY_TRAIL_WIDTH,
                    glow_power: BODY_TRAIL_GLOW,
                    color: ORANGE,
                    trail_time: self.duration,
                },
            });
            self.body = Some(body);
            self.entities.push(body);
        }
        let approach = FlyTo {
            destination: self.impact.with_altitude(self.config.vantage_height_m),
            orientation: Orientation::from_degrees(0.0, self.config.approach_pitch_deg, 0.0),
            duration: self.config.approach_duration,
        };
        log::info!(
            "[session {}] approaching ({:.2}, {:.2})",
            self.id,
            self.impact.latitude,
            self.impact.longitude
        );
        match best_effort("approach flight", viewer.fly_to(approach)) {
            Some(flight) => {
                self.stage = Stage::Approaching {
                    flight: Some(flight),
                }
            }
            // no flight means no completion will arrive; start from where we are
            None => self.start_tracking(clock),
        }
    }

    /// Returns `false` for flights this session is not waiting on.
    pub fn on_flight_complete(&mut self, flight: FlightId, clock: &mut SimulationClock) -> bool {
        match self.stage {
            Stage::Approaching {
                flight: Some(pending),
            } if pending == flight => {
                self.start_tracking(clock);
                true
            }
            _ => false,
        }
    }

    fn start_tracking(&mut self, clock: &mut SimulationClock) {
        clock.set_current(self.start);
        clock.set_animating(true);
        self.tracker.attach(clock);
        self.stage = Stage::Tracking;
        log::info!("[session {}] tracking, playback started", self.id);
    }

    /// Tracker work plus impact detection for one clock tick.
    /// Returns `false` when `subscription` is not this session's tracker.
    pub fn on_tick<V: Viewer, S: Scheduler + ?Sized>(
        &mut self,
        subscription: SubscriptionId,
        tick: ClockTick,
        viewer: &mut V,
        clock: &mut SimulationClock,
        scheduler: &mut S,
    ) -> bool {
        if self.tracker.subscription() != Some(subscription) {
            return false;
        }
        self.tracker.follow(&self.trajectory, &tick, self.body, viewer);
        self.check_impact(&tick, viewer, clock, scheduler);
        true
    }

    /// Enter `Impacted` if `tick` reached the stop instant.
    ///
    /// Any trigger path may call this on every tick; only the first
    /// satisfying call transitions.
    pub fn check_impact<V: Viewer, S: Scheduler + ?Sized>(
        &mut self,
        tick: &ClockTick,
        viewer: &mut V,
        clock: &mut SimulationClock,
        scheduler: &mut S,
    ) -> bool {
        if self.impacted || !tick.reached_stop() {
            return false;
        }
        self.impacted = true;
        best_effort("clear look-at", viewer.clear_look_at());
        self.tracker.detach(clock);
        clock.set_animating(false);

        let impact_position = self.impact.to_cartesian();
        let distance = viewer.camera_position().distance(impact_position);
        let params = ImpactEffectParams::from_distance(distance, &self.config);
        log::info!("[session {}] impact at t={:.2}", self.id, tick.current);
        let effects = ImpactEffects::start(
            self.impact,
            params,
            &self.config,
            StdRng::seed_from_u64(self.seed),
            viewer,
            scheduler,
        );
        self.stage = Stage::Impacted(effects);
        true
    }

    /// Returns `false` when the timer does not belong to this session.
    pub fn on_timer<V: Viewer, S: Scheduler + ?Sized>(
        &mut self,
        fired: TimerFired,
        viewer: &mut V,
        scheduler: &mut S,
    ) -> bool {
        match &mut self.stage {
            Stage::Impacted(effects) => effects.on_timer(fired, viewer, scheduler),
            _ => false,
        }
    }

    /// Track an extra entity (impact zones) so teardown removes it too.
    pub fn adopt_entity(&mut self, entity: EntityId) {
        self.entities.push(entity);
    }

    /// Release every subscription, timer and entity this session holds.
    pub fn teardown<V: Viewer, S: Scheduler + ?Sized>(
        &mut self,
        viewer: &mut V,
        clock: &mut SimulationClock,
        scheduler: &mut S,
    ) {
        match &mut self.stage {
            Stage::Impacted(effects) => effects.cancel(viewer, scheduler),
            Stage::Approaching { flight } => *flight = None,
            Stage::Tracking => {}
        }
        if self.tracker.detach(clock) {
            best_effort("clear look-at", viewer.clear_look_at());
        }
        clock.set_animating(false);
        for entity in self.entities.drain(..) {
            best_effort("remove entity", viewer.remove_entity(entity));
        }
        self.body = None;
        log::debug!("[session {}] torn down", self.id);
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.stage {
            Stage::Approaching { .. } => SessionPhase::Approaching,
            Stage::Tracking => SessionPhase::Tracking,
            Stage::Impacted(effects) if effects.phase() == EffectsPhase::Settled => {
                SessionPhase::Settled
            }
            Stage::Impacted(_) => SessionPhase::Impacted,
        }
    }

    /// Settled with nothing pending.
    pub fn is_terminal(&self) -> bool {
        match &self.stage {
            Stage::Impacted(effects) => effects.is_finished() && !self.tracker.is_attached(),
            _ => false,
        }
    }

    pub fn is_impacted(&self) -> bool {
        self.impacted
    }

    pub fn entry(&self) -> GeoPoint {
        self.entry
    }

    pub fn impact(&self) -> GeoPoint {
        self.impact
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn tracker(&self) -> &CameraTracker {
        &self.tracker
    }

    pub fn tracker_subscription(&self) -> Option<SubscriptionId> {
        self.tracker.subscription()
    }

    pub fn approach_flight(&self) -> Option<FlightId> {
        match self.stage {
            Stage::Approaching { flight } => flight,
            _ => None,
        }
    }

    pub fn effects(&self) -> Option<&ImpactEffects> {
        match &self.stage {
            Stage::Impacted(effects) => Some(effects),
            _ => None,
        }
    }

    /// Shake steps taken so far, rejected ones included.
    pub fn shake_steps(&self) -> u32 {
        self.effects().map_or(0, ImpactEffects::steps_taken)
    }

    pub fn body(&self) -> Option<EntityId> {
        self.body
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }
}
