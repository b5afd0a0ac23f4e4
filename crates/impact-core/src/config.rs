use crate::constants::*;
use glam::DVec3;
use std::time::Duration;

/// Every knob of one impact animation, gathered so front-ends and tests can
/// tweak a copy instead of touching the crate constants.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    pub fall_duration_sec: f64,
    pub sample_step_sec: f64,
    /// Entry point relative to the impact site: (Δlon°, Δlat°, altitude m).
    pub entry_offset: [f64; 3],
    pub vantage_height_m: f64,
    pub approach_duration: Duration,
    pub approach_pitch_deg: f64,
    pub tracking_offset: DVec3,
    pub flash_lifetime: Duration,
    pub shake_steps: u32,
    pub shake_interval: Duration,
    pub settle_height_cap_m: f64,
    pub settle_duration: Duration,
    pub settle_pitch_deg: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fall_duration_sec: FALL_DURATION_SEC,
            sample_step_sec: SAMPLE_STEP_SEC,
            entry_offset: [ENTRY_LON_OFFSET_DEG, ENTRY_LAT_OFFSET_DEG, ENTRY_ALTITUDE_M],
            vantage_height_m: VANTAGE_HEIGHT_M,
            approach_duration: Duration::from_secs_f64(APPROACH_DURATION_SEC),
            approach_pitch_deg: APPROACH_PITCH_DEG,
            tracking_offset: DVec3::from_array(TRACKING_OFFSET_ENU),
            flash_lifetime: Duration::from_millis(FLASH_LIFETIME_MS),
            shake_steps: SHAKE_STEPS,
            shake_interval: Duration::from_millis(SHAKE_INTERVAL_MS),
            settle_height_cap_m: SETTLE_HEIGHT_CAP_M,
            settle_duration: Duration::from_secs_f64(SETTLE_DURATION_SEC),
            settle_pitch_deg: SETTLE_PITCH_DEG,
        }
    }
}

impl AnimationConfig {
    /// Height of the final framing shot above the impact site.
    pub fn settle_height_m(&self) -> f64 {
        self.vantage_height_m.min(self.settle_height_cap_m)
    }
}
