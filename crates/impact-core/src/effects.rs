//! Flash, shake and settle after impact, paced by wall-clock timers.
//!
//! Nothing here reads the logical clock: the sequence keeps running at the
//! same pace whether playback is paused, clamped or sped up.

use crate::config::AnimationConfig;
use crate::constants::*;
use crate::geo::{enu_frame, GeoPoint};
use crate::host::{best_effort, EntityId, EntitySpec, FlightId, FlyTo, Orientation, Viewer};
use crate::scheduler::{Scheduler, TimerFired, TimerId};
use glam::DVec3;
use rand::prelude::*;
use std::time::Duration;

/// Flash sphere radius for a camera `distance_m` away from the impact.
pub fn flash_radius(distance_m: f64) -> f64 {
    if distance_m < FLASH_NEAR_DISTANCE_M {
        (distance_m * FLASH_NEAR_FACTOR).max(FLASH_RADIUS_MIN_M)
    } else {
        (distance_m * FLASH_FAR_FACTOR).min(FLASH_RADIUS_MAX_M)
    }
}

/// Horizontal shake amplitude; the vertical axis uses [`SHAKE_VERTICAL_SCALE`] of it.
pub fn shake_magnitude(distance_m: f64) -> f64 {
    (distance_m * SHAKE_DISTANCE_FACTOR).clamp(SHAKE_MAGNITUDE_MIN_M, SHAKE_MAGNITUDE_MAX_M)
}

/// A shake position is usable only if it stays outside the flash volume.
#[inline]
pub fn accepts_shake_position(candidate: DVec3, impact: DVec3, flash_radius: f64) -> bool {
    candidate.distance(impact) > flash_radius * FLASH_CLEARANCE
}

/// Random jitter in the local (east, north, up) axes, each component within ±magnitude.
pub fn shake_offset<R: Rng>(rng: &mut R, magnitude: f64) -> DVec3 {
    let dx = (rng.gen::<f64>() - 0.5) * magnitude;
    let dy = (rng.gen::<f64>() - 0.5) * magnitude;
    let dz = (rng.gen::<f64>() - 0.5) * magnitude * SHAKE_VERTICAL_SCALE;
    DVec3::new(dx, dy, dz)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactEffectParams {
    pub camera_distance_m: f64,
    pub flash_radius_m: f64,
    pub shake_magnitude_m: f64,
    pub shake_steps: u32,
    pub shake_interval: Duration,
}

impl ImpactEffectParams {
    pub fn from_distance(distance_m: f64, config: &AnimationConfig) -> Self {
        Self {
            camera_distance_m: distance_m,
            flash_radius_m: flash_radius(distance_m),
            shake_magnitude_m: shake_magnitude(distance_m),
            shake_steps: config.shake_steps,
            shake_interval: config.shake_interval,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectsPhase {
    Shaking,
    /// Final fly-to issued; nothing left pending.
    Settled,
}

#[derive(Debug)]
pub struct ImpactEffects {
    params: ImpactEffectParams,
    site: GeoPoint,
    impact: DVec3,
    settle: FlyTo,
    phase: EffectsPhase,
    flash: Option<EntityId>,
    flash_timer: Option<TimerId>,
    shake_timer: Option<TimerId>,
    shake_origin: DVec3,
    steps_taken: u32,
    steps_rejected: u32,
    settle_flight: Option<FlightId>,
    rng: StdRng,
}

impl ImpactEffects {
    /// Spawn the flash, schedule its removal and start shaking from the current camera position.
    pub fn start<V: Viewer, S: Scheduler + ?Sized>(
        site: GeoPoint,
        params: ImpactEffectParams,
        config: &AnimationConfig,
        rng: StdRng,
        viewer: &mut V,
        scheduler: &mut S,
    ) -> Self {
        let impact = site.with_altitude(0.0).to_cartesian();
        let flash = viewer.add_entity(EntitySpec::Flash {
            position: impact,
            radius: params.flash_radius_m,
            color: with_alpha(WHITE, FLASH_ALPHA),
        });
        let flash_timer = scheduler.schedule_once(config.flash_lifetime);
        let shake_timer = if params.shake_steps > 0 {
            Some(scheduler.schedule_repeating(params.shake_interval))
        } else {
            None
        };
        let settle = FlyTo {
            destination: site.with_altitude(config.settle_height_m()),
            orientation: Orientation::from_degrees(0.0, config.settle_pitch_deg, 0.0),
            duration: config.settle_duration,
        };
        log::info!(
            "[effects] flash r={:.0} m, shake m={:.0} m x{} (camera {:.0} m away)",
            params.flash_radius_m,
            params.shake_magnitude_m,
            params.shake_steps,
            params.camera_distance_m
        );
        let mut effects = Self {
            params,
            site,
            impact,
            settle,
            phase: EffectsPhase::Shaking,
            flash: Some(flash),
            flash_timer: Some(flash_timer),
            shake_timer,
            shake_origin: viewer.camera_position(),
            steps_taken: 0,
            steps_rejected: 0,
            settle_flight: None,
            rng,
        };
        if effects.shake_timer.is_none() {
            effects.settle(viewer, scheduler);
        }
        effects
    }

    /// Handle a wall-clock fire. Returns `false` if the timer is not ours.
    pub fn on_timer<V: Viewer, S: Scheduler + ?Sized>(
        &mut self,
        fired: TimerFired,
        viewer: &mut V,
        scheduler: &mut S,
    ) -> bool {
        if self.flash_timer == Some(fired.id) {
            self.flash_timer = None;
            self.expire_flash(viewer);
            true
        } else if self.shake_timer == Some(fired.id) {
            self.shake_step(viewer, scheduler);
            true
        } else {
            false
        }
    }

    fn expire_flash<V: Viewer>(&mut self, viewer: &mut V) {
        if let Some(flash) = self.flash.take() {
            best_effort("remove flash", viewer.remove_entity(flash));
        }
    }

    fn shake_step<V: Viewer, S: Scheduler + ?Sized>(&mut self, viewer: &mut V, scheduler: &mut S) {
        if self.phase != EffectsPhase::Shaking {
            return;
        }
        let jitter = shake_offset(&mut self.rng, self.params.shake_magnitude_m);
        let candidate = self.shake_origin + enu_frame(self.shake_origin) * jitter;
        if accepts_shake_position(candidate, self.impact, self.params.flash_radius_m) {
            best_effort("shake camera", viewer.set_camera_position(candidate));
        } else {
            // camera holds its last position; the step still counts
            self.steps_rejected += 1;
        }
        self.steps_taken += 1;
        if self.steps_taken >= self.params.shake_steps {
            self.settle(viewer, scheduler);
        }
    }

    fn settle<V: Viewer, S: Scheduler + ?Sized>(&mut self, viewer: &mut V, scheduler: &mut S) {
        if let Some(timer) = self.shake_timer.take() {
            scheduler.cancel(timer);
        }
        self.phase = EffectsPhase::Settled;
        self.settle_flight = best_effort("settle flight", viewer.fly_to(self.settle));
        log::info!(
            "[effects] settling over ({:.2}, {:.2}) at {:.0} m",
            self.site.latitude,
            self.site.longitude,
            self.settle.destination.altitude
        );
    }

    /// Cancel whatever is still pending and remove the flash if it is still up.
    pub fn cancel<V: Viewer, S: Scheduler + ?Sized>(&mut self, viewer: &mut V, scheduler: &mut S) {
        if let Some(timer) = self.shake_timer.take() {
            scheduler.cancel(timer);
        }
        if let Some(timer) = self.flash_timer.take() {
            scheduler.cancel(timer);
        }
        self.expire_flash(viewer);
    }

    pub fn params(&self) -> &ImpactEffectParams {
        &self.params
    }

    pub fn phase(&self) -> EffectsPhase {
        self.phase
    }

    pub fn impact_position(&self) -> DVec3 {
        self.impact
    }

    pub fn shake_origin(&self) -> DVec3 {
        self.shake_origin
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn steps_rejected(&self) -> u32 {
        self.steps_rejected
    }

    pub fn flash_entity(&self) -> Option<EntityId> {
        self.flash
    }

    pub fn settle_target(&self) -> &FlyTo {
        &self.settle
    }

    pub fn settle_flight(&self) -> Option<FlightId> {
        self.settle_flight
    }

    /// True once the settle fly-to is issued and no timer is outstanding.
    pub fn is_finished(&self) -> bool {
        self.phase == EffectsPhase::Settled
            && self.flash_timer.is_none()
            && self.shake_timer.is_none()
    }
}
