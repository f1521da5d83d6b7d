// Constants for the toast-stack driver
// Engine timings live in toast_stack_core::constants

// ============================================================================
// Virtual Screen Constants
// ============================================================================

/// Width of the screen toasts are laid out on
pub(crate) const SCREEN_WIDTH: i32 = 1920;

/// Height of the screen toasts are laid out on
pub(crate) const SCREEN_HEIGHT: i32 = 1080;

/// Size of the (invisible) host window, centered on the screen
pub(crate) const HOST_WINDOW_WIDTH: i32 = 800;
pub(crate) const HOST_WINDOW_HEIGHT: i32 = 600;

// ============================================================================
// Text Measurement Constants
// ============================================================================

/// Minimum width of a toast body
pub(crate) const TOAST_MIN_WIDTH: i32 = 300;

/// Maximum width of a toast body, longer text wraps
pub(crate) const TOAST_MAX_WIDTH: i32 = 380;

/// Padding inside a toast body
pub(crate) const TOAST_PADDING: i32 = 12;

/// Gap between title and text
pub(crate) const TITLE_SPACING: i32 = 4;

/// Height of the duration bar strip at the bottom of a toast
pub(crate) const DURATION_BAR_HEIGHT: i32 = 4;

/// Average glyph width as a fraction of the font's pixel size
pub(crate) const AVERAGE_GLYPH_WIDTH: f64 = 0.55;

/// Line height as a multiple of the font's pixel size
pub(crate) const LINE_HEIGHT_FACTOR: f64 = 1.4;

/// Points to pixels at 96 DPI
pub(crate) const POINTS_TO_PIXELS: f64 = 96.0 / 72.0;

// ============================================================================
// Channel and Buffer Constants
// ============================================================================

/// Buffer size for the input and output channels
pub(crate) const CHANNEL_BUFFER_SIZE: usize = 100;
