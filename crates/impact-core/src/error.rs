use crate::geo::GeoPoint;
use thiserror::Error;

/// Rejected animation parameters. No animation starts when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("fall duration must be positive and finite, got {0}")]
    InvalidDuration(f64),
    #[error("sampling step must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("{which} point is not finite: {point:?}")]
    NonFinitePoint {
        which: &'static str,
        point: GeoPoint,
    },
    #[error("{duration} s at a {step} s step needs more than {max} samples")]
    TooManySamples {
        duration: f64,
        step: f64,
        max: usize,
    },
}

/// A transient failure reported by the host renderer.
///
/// These never abort a sequence: callers route them through
/// [`crate::host::best_effort`], which logs and drops them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("camera operation failed: {0}")]
    Camera(String),
    #[error("scene operation failed: {0}")]
    Scene(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImpactError {
    #[error("invalid animation parameters: {0}")]
    Trajectory(#[from] TrajectoryError),
    #[error("impact site is not finite: lon {lon}, lat {lat}")]
    InvalidSite { lon: f64, lat: f64 },
    #[error("no impact site selected")]
    NoSiteSelected,
}
