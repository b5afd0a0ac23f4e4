// Tuning constants shared by the core state machines and the native front-end.

// Trajectory
pub const SAMPLE_STEP_SEC: f64 = 0.1; // fixed spacing between trajectory samples
pub const FALL_DURATION_SEC: f64 = 10.0; // logical seconds from entry to impact
pub const MAX_TRAJECTORY_SAMPLES: usize = 1_000_000; // longer falls are rejected
pub const HORIZONTAL_EASE_EXPONENT: f64 = 0.85; // ease-out on lon/lat
pub const VERTICAL_EASE_EXPONENT: f64 = 1.7; // ease-in on altitude
pub const ENTRY_LON_OFFSET_DEG: f64 = 1.0; // entry point sits north-east of the site
pub const ENTRY_LAT_OFFSET_DEG: f64 = 1.0;
pub const ENTRY_ALTITUDE_M: f64 = 200_000.0;

// Approach
pub const VANTAGE_HEIGHT_M: f64 = 300_000.0; // camera height above the site before the fall
pub const APPROACH_DURATION_SEC: f64 = 2.0;
pub const APPROACH_PITCH_DEG: f64 = -30.0;

// Tracking: camera offset in the body's local east-north-up frame
pub const TRACKING_OFFSET_ENU: [f64; 3] = [0.0, -20_000.0, 7_000.0];

// Flash
pub const FLASH_RADIUS_MAX_M: f64 = 50_000.0;
pub const FLASH_RADIUS_MIN_M: f64 = 5_000.0;
pub const FLASH_FAR_FACTOR: f64 = 0.6; // fraction of camera distance when far
pub const FLASH_NEAR_FACTOR: f64 = 0.4; // fraction of camera distance when close
pub const FLASH_NEAR_DISTANCE_M: f64 = 20_000.0; // below this the near rule applies
pub const FLASH_LIFETIME_MS: u64 = 300;
pub const FLASH_CLEARANCE: f64 = 1.05; // shake positions must stay outside r * this

// Shake
pub const SHAKE_DISTANCE_FACTOR: f64 = 0.02;
pub const SHAKE_MAGNITUDE_MIN_M: f64 = 200.0;
pub const SHAKE_MAGNITUDE_MAX_M: f64 = 1_500.0;
pub const SHAKE_VERTICAL_SCALE: f64 = 0.4;
pub const SHAKE_STEPS: u32 = 8;
pub const SHAKE_INTERVAL_MS: u64 = 60;

// Settle
pub const SETTLE_HEIGHT_CAP_M: f64 = 120_000.0;
pub const SETTLE_DURATION_SEC: f64 = 1.2;
pub const SETTLE_PITCH_DEG: f64 = -35.0;

// Body rendering
pub const BODY_TRAIL_WIDTH: f32 = 10.0;
pub const BODY_TRAIL_GLOW: f32 = 0.3;
pub const TINT_HIGH_ALTITUDE_M: f64 = 150_000.0; // above: yellow
pub const TINT_MID_ALTITUDE_M: f64 = 80_000.0; // above: orange, below: red

// Site marker
pub const SITE_MARKER_PIXEL_SIZE: f32 = 12.0;
pub const SITE_MARKER_OUTLINE_WIDTH: f32 = 2.0;

// Palette (RGBA, linear 0..1)
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const ORANGE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
pub const BROWN: [f32; 4] = [0.647, 0.165, 0.165, 1.0];
pub const FLASH_ALPHA: f32 = 0.5;
pub const THERMAL_ALPHA: f32 = 0.3;
pub const SHOCKWAVE_ALPHA: f32 = 0.4;
pub const CRATER_ALPHA: f32 = 0.7;

#[inline]
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}
