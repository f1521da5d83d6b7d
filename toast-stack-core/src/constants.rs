// Timing and layout constants shared by the stacking engine

// ============================================================================
// Layout
// ============================================================================

/// Padding reserved around every toast for its drop shadow (pixels)
pub const DROP_SHADOW_SIZE: i32 = 5;

/// Divisor applied to a toast's outer height to get its entrance slide distance
pub const SLIDE_DISTANCE_DIVISOR: f64 = 1.5;

// ============================================================================
// Timing (milliseconds)
// ============================================================================

/// Default time until a toast dismisses itself
pub const DEFAULT_DURATION: u64 = 5000;

/// Default fade-in and fade-out duration
pub const DEFAULT_FADE_DURATION: u64 = 250;

/// Interval between duration bar updates
pub const DURATION_BAR_UPDATE_INTERVAL: u64 = 10;

/// Interval between intermediate animation frames (~60 FPS)
pub const FRAME_INTERVAL: u64 = 16;

// ============================================================================
// Bookkeeping
// ============================================================================

/// Number of closed toast ids remembered for state queries
pub const HISTORY_LIMIT: usize = 100;
