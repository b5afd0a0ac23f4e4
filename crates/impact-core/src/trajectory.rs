//! Stylized fall path from an entry point to the impact site.
//!
//! Lateral motion eases out while the descent eases in, so the body appears
//! to slow sideways and plunge at the end. The discrete samples are joined
//! by a C1 quadratic spline: every interval is split at its midpoint into two
//! parabolas that share value and slope there and match the sample values and
//! tangents at both ends.

use crate::constants::{
    HORIZONTAL_EASE_EXPONENT, MAX_TRAJECTORY_SAMPLES, SAMPLE_STEP_SEC, VERTICAL_EASE_EXPONENT,
};
use crate::error::TrajectoryError;
use crate::geo::GeoPoint;
use glam::DVec3;

// Absorbs float error in duration / step so exact multiples get their last sample.
const STEP_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySample {
    /// Seconds since the start of the fall.
    pub time_offset: f64,
    pub geo: GeoPoint,
    pub position: DVec3,
}

/// Immutable sampled path with smooth position queries.
#[derive(Clone, Debug)]
pub struct Trajectory {
    samples: Vec<TrajectorySample>,
    tangents: Vec<DVec3>,
    duration: f64,
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Ease-out factor for longitude and latitude.
#[inline]
pub fn horizontal_blend(u: f64) -> f64 {
    1.0 - (1.0 - u).powf(HORIZONTAL_EASE_EXPONENT)
}

/// Ease-in factor for altitude.
#[inline]
pub fn vertical_blend(u: f64) -> f64 {
    u.powf(VERTICAL_EASE_EXPONENT)
}

/// Number of samples for a fall of `duration` seconds: `floor(duration / step) + 1`.
///
/// `None` when that exceeds [`MAX_TRAJECTORY_SAMPLES`] or is not representable.
pub fn sample_count(duration: f64, step: f64) -> Option<usize> {
    let intervals = (duration / step + STEP_EPSILON).floor();
    if !intervals.is_finite() || intervals < 0.0 || intervals >= MAX_TRAJECTORY_SAMPLES as f64 {
        return None;
    }
    (intervals as usize).checked_add(1)
}

#[derive(Clone, Copy, Debug)]
pub struct TrajectoryGenerator {
    step: f64,
}

impl Default for TrajectoryGenerator {
    fn default() -> Self {
        Self {
            step: SAMPLE_STEP_SEC,
        }
    }
}

impl TrajectoryGenerator {
    pub fn new(step: f64) -> Result<Self, TrajectoryError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(TrajectoryError::InvalidStep(step));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn generate(
        &self,
        entry: GeoPoint,
        impact: GeoPoint,
        duration: f64,
    ) -> Result<Trajectory, TrajectoryError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TrajectoryError::InvalidDuration(duration));
        }
        if !entry.is_finite() {
            return Err(TrajectoryError::NonFinitePoint {
                which: "entry",
                point: entry,
            });
        }
        if !impact.is_finite() {
            return Err(TrajectoryError::NonFinitePoint {
                which: "impact",
                point: impact,
            });
        }

        let count = sample_count(duration, self.step).ok_or(TrajectoryError::TooManySamples {
            duration,
            step: self.step,
            max: MAX_TRAJECTORY_SAMPLES,
        })?;
        let samples = (0..count)
            .map(|i| {
                let time_offset = (i as f64 * self.step).min(duration);
                let u = time_offset / duration;
                let uh = horizontal_blend(u);
                let uz = vertical_blend(u);
                let geo = GeoPoint::new(
                    lerp(entry.longitude, impact.longitude, uh),
                    lerp(entry.latitude, impact.latitude, uh),
                    lerp(entry.altitude, impact.altitude, uz),
                );
                TrajectorySample {
                    time_offset,
                    geo,
                    position: geo.to_cartesian(),
                }
            })
            .collect::<Vec<_>>();
        let tangents = estimate_tangents(&samples);
        log::debug!(
            "[trajectory] {} samples over {:.2}s, entry alt {:.0} m",
            samples.len(),
            duration,
            entry.altitude
        );
        Ok(Trajectory {
            samples,
            tangents,
            duration,
        })
    }
}

/// Generate with the default 0.1 s step.
pub fn make_trajectory(
    entry: GeoPoint,
    impact: GeoPoint,
    duration: f64,
) -> Result<Trajectory, TrajectoryError> {
    TrajectoryGenerator::default().generate(entry, impact, duration)
}

// Central differences inside; the ends use the mean-slope identity
// (p1 - p0) / h = (d0 + d1) / 2, which is exact for parabolas.
fn estimate_tangents(samples: &[TrajectorySample]) -> Vec<DVec3> {
    let n = samples.len();
    match n {
        0 | 1 => vec![DVec3::ZERO; n],
        2 => {
            let h = samples[1].time_offset - samples[0].time_offset;
            let d = (samples[1].position - samples[0].position) / h;
            vec![d, d]
        }
        _ => {
            let mut tangents = vec![DVec3::ZERO; n];
            for i in 1..n - 1 {
                let span = samples[i + 1].time_offset - samples[i - 1].time_offset;
                tangents[i] = (samples[i + 1].position - samples[i - 1].position) / span;
            }
            let h0 = samples[1].time_offset - samples[0].time_offset;
            tangents[0] = 2.0 * (samples[1].position - samples[0].position) / h0 - tangents[1];
            let hn = samples[n - 1].time_offset - samples[n - 2].time_offset;
            tangents[n - 1] =
                2.0 * (samples[n - 1].position - samples[n - 2].position) / hn - tangents[n - 2];
            tangents
        }
    }
}

impl Trajectory {
    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Requested fall duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time offset of the last sample; queries past it return `None`.
    pub fn end_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.time_offset)
    }

    /// Position at `time_offset` seconds from the start, or `None` outside the sampled range.
    pub fn position_at(&self, time_offset: f64) -> Option<DVec3> {
        if !time_offset.is_finite()
            || time_offset < 0.0
            || time_offset > self.end_time() + STEP_EPSILON
        {
            return None;
        }
        if self.samples.len() == 1 {
            return Some(self.samples[0].position);
        }
        let t = time_offset.min(self.end_time());
        let i = self
            .samples
            .partition_point(|s| s.time_offset <= t)
            .saturating_sub(1)
            .min(self.samples.len() - 2);
        Some(self.eval_segment(i, t))
    }

    /// Geodetic form of [`Trajectory::position_at`].
    pub fn geo_at(&self, time_offset: f64) -> Option<GeoPoint> {
        self.position_at(time_offset).map(GeoPoint::from_cartesian)
    }

    fn eval_segment(&self, i: usize, t: f64) -> DVec3 {
        let (a, b) = (&self.samples[i], &self.samples[i + 1]);
        let (p0, p1) = (a.position, b.position);
        let (d0, d1) = (self.tangents[i], self.tangents[i + 1]);
        let h = b.time_offset - a.time_offset;
        if h <= 0.0 {
            return p0;
        }
        let s = t - a.time_offset;
        // half-curvature of the left parabola
        let k0 = 2.0 * (p1 - p0) / (h * h) - (3.0 * d0 + d1) / (2.0 * h);
        if s <= 0.5 * h {
            p0 + d0 * s + k0 * (s * s)
        } else {
            let k1 = (d1 - d0 - k0 * h) / h;
            let r = s - h;
            p1 + d1 * r + k1 * (r * r)
        }
    }

    pub fn start_position(&self) -> Option<DVec3> {
        self.samples.first().map(|s| s.position)
    }

    pub fn end_position(&self) -> Option<DVec3> {
        self.samples.last().map(|s| s.position)
    }
}
