pub mod animation;
pub mod constants;
pub mod geometry;
pub mod host;
pub mod position;
pub mod scheduler;
pub mod stack;
pub mod timer;

pub use animation::{AnimationCoordinator, AnimationId, Completion, Sample};
pub use geometry::{Point, Rect, Size};
pub use host::{Font, Host, Renderer, TextFonts};
pub use position::{calculate_position, select_screen, stacking_offset};
pub use scheduler::{Scheduler, Task, TaskKey};
pub use stack::{Event, StackManager};
pub use timer::{Countdown, TimerEngine, remaining_bar_width};
pub use toast_stack_config::{QueueDiscipline, ToastPosition, ToastsConfig};

use constants::{DEFAULT_DURATION, DEFAULT_FADE_DURATION, DROP_SHADOW_SIZE};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Process-unique toast identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(u64);

impl ToastId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ToastId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a toast.
///
/// `Created → Showing → FadingOut → Closed`. A queued toast stays `Created`
/// until it is admitted, and may jump straight to `Closed` when dismissed
/// from the queue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToastState {
    #[default]
    Created,
    Showing,
    FadingOut,
    Closed,
}

/// A single toast and its runtime state.
///
/// Built by the caller, then moved into a [`StackManager`] which drives the
/// rest of its lifecycle. Durations are in milliseconds.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    title: String,
    text: String,
    fonts: TextFonts,
    duration: u64,
    show_duration_bar: bool,
    reset_on_hover: bool,
    fade_in_duration: u64,
    fade_out_duration: u64,

    pub(crate) state: ToastState,
    pub(crate) elapsed_time: u64,
    pub(crate) measured_size: Size,
    pub(crate) position: Point,
    pub(crate) opacity: f32,
    pub(crate) duration_bar_width: i32,
    pub(crate) countdown: Countdown,
}

impl Toast {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: ToastId::next(),
            title: title.into(),
            text: text.into(),
            fonts: TextFonts::default(),
            duration: DEFAULT_DURATION,
            show_duration_bar: true,
            reset_on_hover: true,
            fade_in_duration: DEFAULT_FADE_DURATION,
            fade_out_duration: DEFAULT_FADE_DURATION,
            state: ToastState::Created,
            elapsed_time: 0,
            measured_size: Size::default(),
            position: Point::default(),
            opacity: 0.0,
            duration_bar_width: 0,
            countdown: Countdown::default(),
        }
    }

    /// Time until auto-dismiss. `0` keeps the toast until it is dismissed.
    #[must_use]
    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_duration_bar(mut self, on: bool) -> Self {
        self.show_duration_bar = on;
        self
    }

    #[must_use]
    pub fn with_reset_on_hover(mut self, on: bool) -> Self {
        self.reset_on_hover = on;
        self
    }

    #[must_use]
    pub fn with_fade_in_duration(mut self, duration: u64) -> Self {
        self.fade_in_duration = duration;
        self
    }

    #[must_use]
    pub fn with_fade_out_duration(mut self, duration: u64) -> Self {
        self.fade_out_duration = duration;
        self
    }

    #[must_use]
    pub fn with_fonts(mut self, fonts: TextFonts) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fonts(&self) -> &TextFonts {
        &self.fonts
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn show_duration_bar(&self) -> bool {
        self.show_duration_bar
    }

    pub fn reset_on_hover(&self) -> bool {
        self.reset_on_hover
    }

    pub fn fade_in_duration(&self) -> u64 {
        self.fade_in_duration
    }

    pub fn fade_out_duration(&self) -> u64 {
        self.fade_out_duration
    }

    pub fn state(&self) -> ToastState {
        self.state
    }

    pub fn elapsed_time(&self) -> u64 {
        self.elapsed_time
    }

    /// Body size reported by the renderer, zero until submitted
    pub fn measured_size(&self) -> Size {
        self.measured_size
    }

    /// Window size including the drop shadow padding on every side
    pub fn outer_size(&self) -> Size {
        Size::new(
            self.measured_size.width + DROP_SHADOW_SIZE * 2,
            self.measured_size.height + DROP_SHADOW_SIZE * 2,
        )
    }

    /// Last position pushed to the renderer
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn duration_bar_width(&self) -> i32 {
        self.duration_bar_width
    }

    /// Whether the auto-dismiss countdown is currently running
    pub fn countdown_active(&self) -> bool {
        self.countdown.is_active()
    }
}
