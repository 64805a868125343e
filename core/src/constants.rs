// Game configuration constants
// These are shared by the replay engine and every presentation layer - must match exactly!

/// Length of a round (seconds)
pub const ROUND_SECONDS: u32 = 60;

/// Length of one countdown tick (milliseconds)
pub const TICK_MS: u64 = 1000;

/// Remaining time at or below which the countdown is shown as critical (seconds)
pub const CRITICAL_SECONDS: u32 = 10;

/// Maximum per-channel difference still counted as a match
pub const MATCH_TOLERANCE: u8 = 15;

/// Points awarded for a match, multiplied by the current streak multiplier
pub const POINTS_PER_MATCH: u64 = 100;

/// Streak multiplier at session start and after a timeout
pub const BASE_MULTIPLIER: u32 = 1;

/// Default tab angles (degrees): red, green, blue
pub const DEFAULT_RED_ANGLE: f64 = 0.0;
pub const DEFAULT_GREEN_ANGLE: f64 = 120.0;
pub const DEFAULT_BLUE_ANGLE: f64 = 240.0;

/// Wheel center in wheel-local coordinates (pixels)
pub const WHEEL_CENTER_X: f64 = 150.0;
pub const WHEEL_CENTER_Y: f64 = 150.0;

/// Radius of the circle the tabs travel on (pixels)
pub const WHEEL_RADIUS: f64 = 120.0;

/// Supported session log format version
pub const LOG_VERSION: u32 = 1;

/// Domain prefix for the session log hash
pub const LOG_HASH_PREFIX: &[u8] = b"WHEELLOGv1";

/// Maximum number of events allowed in a session log
pub const MAX_EVENTS: usize = 100_000;
