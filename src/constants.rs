//! Frame pacing and startup constants for the native front-end.

use impact_core::GeoPoint;
use std::time::Duration;

// Target frame interval for the real-time loop (~60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// Frame delta used by the fast (non-sleeping) loop
pub const FIXED_FRAME_DT: Duration = Duration::from_millis(16);

// Give up if a sequence has not settled after this much wall-clock time
pub const MAX_SEQUENCE_TIME: Duration = Duration::from_secs(60);

// Camera starts far out, looking at the whole globe
pub const HOME_VIEW: GeoPoint = GeoPoint::new(0.0, 20.0, 20_000_000.0);

pub const DEFAULT_SEED: u64 = 0x1A2B_3C4D;
