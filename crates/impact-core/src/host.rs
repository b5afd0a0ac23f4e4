//! What the core needs from the host rendering engine.
//!
//! The globe renderer owns the scene graph and the camera. The core only
//! issues requests through these traits and receives fly-to completions back
//! as events, so it never holds a callback into the host.

use crate::error::RenderError;
use crate::geo::GeoPoint;
use crate::results::ImpactZone;
use glam::DVec3;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId(pub u64);

pub type Rgba = [f32; 4];

/// Heading, pitch and roll in radians.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Orientation {
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Orientation {
    pub fn from_degrees(heading: f64, pitch: f64, roll: f64) -> Self {
        Self {
            heading: heading.to_radians(),
            pitch: pitch.to_radians(),
            roll: roll.to_radians(),
        }
    }
}

/// A timed camera transition. The host reports completion with the
/// [`FlightId`] returned from [`CameraRig::fly_to`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlyTo {
    pub destination: GeoPoint,
    pub orientation: Orientation,
    pub duration: Duration,
}

/// Glowing polyline that follows a moving entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailStyle {
    pub width: f32,
    pub glow_power: f32,
    pub color: Rgba,
    /// Seconds of history kept behind the body.
    pub trail_time: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntitySpec {
    SiteMarker {
        position: DVec3,
        pixel_size: f32,
        color: Rgba,
        outline_color: Rgba,
        outline_width: f32,
    },
    Body {
        position: DVec3,
        trail: TrailStyle,
    },
    Flash {
        position: DVec3,
        radius: f64,
        color: Rgba,
    },
    Zone(ImpactZone),
}

impl EntitySpec {
    pub fn label(&self) -> &str {
        match self {
            EntitySpec::SiteMarker { .. } => "Impact Site",
            EntitySpec::Body { .. } => "Asteroid",
            EntitySpec::Flash { .. } => "Impact Flash",
            EntitySpec::Zone(zone) => zone.name,
        }
    }
}

pub trait Scene {
    fn add_entity(&mut self, spec: EntitySpec) -> EntityId;
    /// `Ok(false)` when the entity is already gone.
    fn remove_entity(&mut self, id: EntityId) -> Result<bool, RenderError>;
    fn move_entity(&mut self, id: EntityId, position: DVec3) -> Result<(), RenderError>;
    fn tint_entity(&mut self, id: EntityId, color: Rgba) -> Result<(), RenderError>;
}

pub trait CameraRig {
    fn camera_position(&self) -> DVec3;
    fn set_camera_position(&mut self, destination: DVec3) -> Result<(), RenderError>;
    /// Aim at `target` from `offset`, given in the target's east-north-up frame.
    fn look_at(&mut self, target: DVec3, offset: DVec3) -> Result<(), RenderError>;
    /// Drop any look-at transform and return to free camera control.
    fn clear_look_at(&mut self) -> Result<(), RenderError>;
    fn fly_to(&mut self, flight: FlyTo) -> Result<FlightId, RenderError>;
}

/// A full host: scene graph plus camera.
pub trait Viewer: Scene + CameraRig {}

impl<T: Scene + CameraRig> Viewer for T {}

/// Run a render request whose failure only costs this frame's effect.
#[inline]
pub fn best_effort<T>(what: &str, result: Result<T, RenderError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("[render] {what} skipped: {e}");
            None
        }
    }
}
