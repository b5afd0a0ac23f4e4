//! Simulation backend output and the static overlays derived from it.
//!
//! The numbers are opaque here: they only size the impact zones drawn
//! around the site.

use crate::constants::*;
use crate::geo::GeoPoint;
use crate::host::{EntitySpec, Rgba};
use glam::DVec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactResults {
    pub diameter_m: f64,
    pub crater_diameter_km: f64,
    pub shockwave_radius_km: f64,
    pub thermal_radius_km: f64,
    pub earthquake_magnitude: f64,
    pub energy_megatons: f64,
    pub population_density: u64,
}

/// Filled ellipse centered on the impact site.
#[derive(Clone, Debug, PartialEq)]
pub struct ImpactZone {
    pub name: &'static str,
    pub center: DVec3,
    pub semi_major_m: f64,
    pub semi_minor_m: f64,
    pub fill: Rgba,
    pub outline: Rgba,
}

impl ImpactZone {
    fn circle(name: &'static str, center: DVec3, radius_m: f64, fill: Rgba, outline: Rgba) -> Self {
        Self {
            name,
            center,
            semi_major_m: radius_m,
            semi_minor_m: radius_m,
            fill,
            outline,
        }
    }
}

/// Thermal, shockwave and crater zones, widest first.
pub fn impact_zones(site: GeoPoint, results: &ImpactResults) -> [ImpactZone; 3] {
    let center = site.with_altitude(0.0).to_cartesian();
    [
        ImpactZone::circle(
            "Thermal Radiation Radius",
            center,
            results.thermal_radius_km * 1000.0,
            with_alpha(YELLOW, THERMAL_ALPHA),
            ORANGE,
        ),
        ImpactZone::circle(
            "Shockwave",
            center,
            results.shockwave_radius_km * 1000.0,
            with_alpha(ORANGE, SHOCKWAVE_ALPHA),
            RED,
        ),
        ImpactZone::circle(
            "Crater",
            center,
            results.crater_diameter_km * 1000.0 / 2.0,
            with_alpha(BROWN, CRATER_ALPHA),
            BLACK,
        ),
    ]
}

/// Trail color for a body at `altitude_m`: hot colors near the ground.
pub fn altitude_tint(altitude_m: f64) -> Rgba {
    if altitude_m > TINT_HIGH_ALTITUDE_M {
        YELLOW
    } else if altitude_m > TINT_MID_ALTITUDE_M {
        ORANGE
    } else {
        RED
    }
}

pub fn site_marker(site: GeoPoint) -> EntitySpec {
    EntitySpec::SiteMarker {
        position: site.with_altitude(0.0).to_cartesian(),
        pixel_size: SITE_MARKER_PIXEL_SIZE,
        color: RED,
        outline_color: WHITE,
        outline_width: SITE_MARKER_OUTLINE_WIDTH,
    }
}

/// Status line shown after a site is picked.
pub fn site_status(site: GeoPoint) -> String {
    format!("Point set: {:.2}, {:.2}", site.latitude, site.longitude)
}
