//! Geodetic points on the WGS84 ellipsoid and their Earth-fixed Cartesian form.
//!
//! All Cartesian positions in this crate are Earth-centered, Earth-fixed
//! meters (x through the prime meridian, z through the north pole), the frame
//! globe renderers use for world space.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

pub const WGS84_SEMI_MAJOR_M: f64 = 6_378_137.0;
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

#[inline]
fn eccentricity_sq() -> f64 {
    WGS84_FLATTENING * (2.0 - WGS84_FLATTENING)
}

#[inline]
fn semi_minor() -> f64 {
    WGS84_SEMI_MAJOR_M * (1.0 - WGS84_FLATTENING)
}

/// Longitude and latitude in degrees, altitude in meters above the ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

impl GeoPoint {
    pub const fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
        }
    }

    pub const fn on_surface(longitude: f64, latitude: f64) -> Self {
        Self::new(longitude, latitude, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite() && self.altitude.is_finite()
    }

    pub const fn with_altitude(self, altitude: f64) -> Self {
        Self::new(self.longitude, self.latitude, altitude)
    }

    /// Shift by whole degrees and replace the altitude.
    pub fn offset(self, d_lon: f64, d_lat: f64, altitude: f64) -> Self {
        Self::new(self.longitude + d_lon, self.latitude + d_lat, altitude)
    }

    pub fn to_cartesian(&self) -> DVec3 {
        let lon = self.longitude.to_radians();
        let lat = self.latitude.to_radians();
        let e2 = eccentricity_sq();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = WGS84_SEMI_MAJOR_M / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        DVec3::new(
            (n + self.altitude) * cos_lat * lon.cos(),
            (n + self.altitude) * cos_lat * lon.sin(),
            (n * (1.0 - e2) + self.altitude) * sin_lat,
        )
    }

    /// Inverse of [`GeoPoint::to_cartesian`], iterated to sub-millimeter.
    pub fn from_cartesian(position: DVec3) -> Self {
        let e2 = eccentricity_sq();
        let p = position.x.hypot(position.y);
        let longitude = position.y.atan2(position.x).to_degrees();
        if p < 1e-6 {
            let latitude = if position.z >= 0.0 { 90.0 } else { -90.0 };
            return Self::new(0.0, latitude, position.z.abs() - semi_minor());
        }
        let mut lat = position.z.atan2(p * (1.0 - e2));
        let mut altitude = 0.0;
        for _ in 0..8 {
            let sin_lat = lat.sin();
            let n = WGS84_SEMI_MAJOR_M / (1.0 - e2 * sin_lat * sin_lat).sqrt();
            altitude = p / lat.cos() - n;
            lat = position.z.atan2(p * (1.0 - e2 * n / (n + altitude)));
        }
        Self::new(longitude, lat.to_degrees(), altitude)
    }
}

/// Columns are the east, north and up unit vectors at `position`.
pub fn enu_frame(position: DVec3) -> DMat3 {
    let a2 = WGS84_SEMI_MAJOR_M * WGS84_SEMI_MAJOR_M;
    let b2 = semi_minor() * semi_minor();
    let up = DVec3::new(position.x / a2, position.y / a2, position.z / b2).normalize_or_zero();
    if up == DVec3::ZERO {
        return DMat3::IDENTITY;
    }
    let east = DVec3::new(-position.y, position.x, 0.0)
        .try_normalize()
        .unwrap_or(DVec3::X);
    let north = up.cross(east);
    DMat3::from_cols(east, north, up)
}

/// World position of `offset` expressed in the local frame at `target`.
#[inline]
pub fn local_to_world(target: DVec3, offset: DVec3) -> DVec3 {
    target + enu_frame(target) * offset
}
