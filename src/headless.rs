use fnv::FnvHashMap;
use glam::DVec3;
use impact_core::{
    local_to_world, CameraRig, EntityId, EntitySpec, FlightId, FlyTo, GeoPoint, Orientation,
    RenderError, Rgba, Scene,
};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedEntity {
    pub spec: EntitySpec,
    pub position: DVec3,
    pub tint: Option<Rgba>,
}

#[derive(Clone, Copy, Debug)]
struct ActiveFlight {
    id: FlightId,
    from: DVec3,
    to: DVec3,
    orientation: Orientation,
    duration: Duration,
    elapsed: Duration,
}

/// Stand-in globe renderer: keeps the scene graph in a table and moves a
/// virtual camera, without drawing anything.
#[derive(Debug)]
pub struct HeadlessViewer {
    camera_position: DVec3,
    orientation: Orientation,
    look_at: Option<(DVec3, DVec3)>,
    flight: Option<ActiveFlight>,
    next_flight: u64,
    entities: FnvHashMap<EntityId, RenderedEntity>,
    next_entity: u64,
}

#[inline]
fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl HeadlessViewer {
    pub fn new(home: GeoPoint) -> Self {
        Self {
            camera_position: home.to_cartesian(),
            orientation: Orientation::from_degrees(0.0, -90.0, 0.0),
            look_at: None,
            flight: None,
            next_flight: 0,
            entities: FnvHashMap::default(),
            next_entity: 0,
        }
    }

    /// Advance the active fly-to. Returns its id on the frame it completes.
    pub fn step(&mut self, elapsed: Duration) -> Option<FlightId> {
        let flight = self.flight.as_mut()?;
        flight.elapsed += elapsed;
        let t = if flight.duration.is_zero() {
            1.0
        } else {
            flight.elapsed.as_secs_f64() / flight.duration.as_secs_f64()
        };
        self.camera_position = flight.from.lerp(flight.to, smoothstep(t));
        if t < 1.0 {
            return None;
        }
        let done = *flight;
        self.flight = None;
        self.camera_position = done.to;
        self.orientation = done.orientation;
        log::debug!("[viewer] flight {:?} complete", done.id);
        Some(done.id)
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.look_at.is_some()
    }

    pub fn camera_orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn camera_geo(&self) -> GeoPoint {
        GeoPoint::from_cartesian(self.camera_position)
    }

    pub fn entity(&self, id: EntityId) -> Option<&RenderedEntity> {
        self.entities.get(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn count_labelled(&self, label: &str) -> usize {
        self.entities
            .values()
            .filter(|e| e.spec.label() == label)
            .count()
    }
}

fn spec_position(spec: &EntitySpec) -> DVec3 {
    match spec {
        EntitySpec::SiteMarker { position, .. }
        | EntitySpec::Body { position, .. }
        | EntitySpec::Flash { position, .. } => *position,
        EntitySpec::Zone(zone) => zone.center,
    }
}

impl Scene for HeadlessViewer {
    fn add_entity(&mut self, spec: EntitySpec) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        log::debug!("[viewer] add {} as {:?}", spec.label(), id);
        let position = spec_position(&spec);
        self.entities.insert(
            id,
            RenderedEntity {
                spec,
                position,
                tint: None,
            },
        );
        id
    }

    fn remove_entity(&mut self, id: EntityId) -> Result<bool, RenderError> {
        Ok(self.entities.remove(&id).is_some())
    }

    fn move_entity(&mut self, id: EntityId, position: DVec3) -> Result<(), RenderError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or_else(|| RenderError::Scene(format!("no entity {id:?}")))?;
        entity.position = position;
        Ok(())
    }

    fn tint_entity(&mut self, id: EntityId, color: Rgba) -> Result<(), RenderError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or_else(|| RenderError::Scene(format!("no entity {id:?}")))?;
        entity.tint = Some(color);
        Ok(())
    }
}

impl CameraRig for HeadlessViewer {
    fn camera_position(&self) -> DVec3 {
        self.camera_position
    }

    fn set_camera_position(&mut self, destination: DVec3) -> Result<(), RenderError> {
        if !destination.is_finite() {
            return Err(RenderError::Camera("non-finite destination".into()));
        }
        self.flight = None;
        self.camera_position = destination;
        Ok(())
    }

    fn look_at(&mut self, target: DVec3, offset: DVec3) -> Result<(), RenderError> {
        let eye = local_to_world(target, offset);
        if !eye.is_finite() || eye.distance_squared(target) == 0.0 {
            return Err(RenderError::Camera("degenerate look-at".into()));
        }
        self.flight = None;
        self.camera_position = eye;
        self.look_at = Some((target, offset));
        Ok(())
    }

    fn clear_look_at(&mut self) -> Result<(), RenderError> {
        self.look_at = None;
        Ok(())
    }

    fn fly_to(&mut self, flight: FlyTo) -> Result<FlightId, RenderError> {
        if !flight.destination.is_finite() {
            return Err(RenderError::Camera("non-finite fly-to destination".into()));
        }
        // a new flight silently replaces one in progress
        let id = FlightId(self.next_flight);
        self.next_flight += 1;
        self.look_at = None;
        self.flight = Some(ActiveFlight {
            id,
            from: self.camera_position,
            to: flight.destination.to_cartesian(),
            orientation: flight.orientation,
            duration: flight.duration,
            elapsed: Duration::ZERO,
        });
        Ok(id)
    }
}
