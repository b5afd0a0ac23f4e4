// Fakes shared by the integration tests: a viewer that records every
// request and a scheduler that counts schedules and cancels.

#![allow(dead_code)]

use glam::DVec3;
use impact_core::*;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Default)]
pub struct RecordingViewer {
    pub camera: DVec3,
    pub look_ats: Vec<(DVec3, DVec3)>,
    pub look_at_clears: u32,
    pub camera_moves: Vec<DVec3>,
    pub flights: Vec<(FlightId, FlyTo)>,
    pub entities: BTreeMap<EntityId, EntitySpec>,
    pub removed: Vec<EntityId>,
    pub tints: Vec<(EntityId, Rgba)>,
    pub fail_camera: bool,
    pub fail_fly: bool,
    next_entity: u64,
    next_flight: u64,
}

impl RecordingViewer {
    pub fn new() -> Self {
        Self {
            camera: GeoPoint::new(0.0, 0.0, 20_000_000.0).to_cartesian(),
            ..Default::default()
        }
    }

    /// Put the camera where the last flight was heading.
    pub fn land_last_flight(&mut self) -> FlightId {
        let (id, flight) = *self.flights.last().expect("no flight requested");
        self.camera = flight.destination.to_cartesian();
        id
    }

    pub fn count_labelled(&self, label: &str) -> usize {
        self.entities
            .values()
            .filter(|spec| spec.label() == label)
            .count()
    }
}

impl Scene for RecordingViewer {
    fn add_entity(&mut self, spec: EntitySpec) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        self.entities.insert(id, spec);
        id
    }

    fn remove_entity(&mut self, id: EntityId) -> Result<bool, RenderError> {
        self.removed.push(id);
        Ok(self.entities.remove(&id).is_some())
    }

    fn move_entity(&mut self, id: EntityId, _position: DVec3) -> Result<(), RenderError> {
        if self.entities.contains_key(&id) {
            Ok(())
        } else {
            Err(RenderError::Scene(format!("no entity {id:?}")))
        }
    }

    fn tint_entity(&mut self, id: EntityId, color: Rgba) -> Result<(), RenderError> {
        self.tints.push((id, color));
        Ok(())
    }
}

impl CameraRig for RecordingViewer {
    fn camera_position(&self) -> DVec3 {
        self.camera
    }

    fn set_camera_position(&mut self, destination: DVec3) -> Result<(), RenderError> {
        if self.fail_camera {
            return Err(RenderError::Camera("set position refused".into()));
        }
        self.camera_moves.push(destination);
        self.camera = destination;
        Ok(())
    }

    fn look_at(&mut self, target: DVec3, offset: DVec3) -> Result<(), RenderError> {
        if self.fail_camera {
            return Err(RenderError::Camera("look-at refused".into()));
        }
        self.look_ats.push((target, offset));
        self.camera = local_to_world(target, offset);
        Ok(())
    }

    fn clear_look_at(&mut self) -> Result<(), RenderError> {
        self.look_at_clears += 1;
        Ok(())
    }

    fn fly_to(&mut self, flight: FlyTo) -> Result<FlightId, RenderError> {
        if self.fail_fly {
            return Err(RenderError::Camera("fly-to refused".into()));
        }
        let id = FlightId(self.next_flight);
        self.next_flight += 1;
        self.flights.push((id, flight));
        Ok(id)
    }
}

#[derive(Default)]
pub struct CountingScheduler {
    pub inner: TimerQueue,
    pub once: Vec<TimerId>,
    pub repeating: Vec<TimerId>,
    pub cancels: Vec<TimerId>,
}

impl CountingScheduler {
    pub fn cancel_count(&self, id: TimerId) -> usize {
        self.cancels.iter().filter(|c| **c == id).count()
    }
}

impl Scheduler for CountingScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let id = self.inner.schedule_once(delay);
        self.once.push(id);
        id
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let id = self.inner.schedule_repeating(interval);
        self.repeating.push(id);
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.cancels.push(id);
        self.inner.cancel(id)
    }

    fn now(&self) -> Duration {
        self.inner.now()
    }

    fn advance(&mut self, elapsed: Duration) {
        self.inner.advance(elapsed)
    }

    fn next_due(&mut self) -> Option<TimerFired> {
        self.inner.next_due()
    }

    fn pending(&self) -> usize {
        self.inner.pending()
    }
}

pub fn make_results() -> ImpactResults {
    ImpactResults {
        diameter_m: 800.0,
        crater_diameter_km: 50.0,
        shockwave_radius_km: 100.0,
        thermal_radius_km: 400.0,
        earthquake_magnitude: 7.5,
        energy_megatons: 21_600.0,
        population_density: 1_234_567,
    }
}

pub fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
