//! Auto-dismiss countdown and duration bar ticking.
//!
//! Hovering a toast with `reset_on_hover` throws the countdown away entirely;
//! leaving it starts a fresh full-length one. There is no pause.

use crate::constants::DURATION_BAR_UPDATE_INTERVAL;
use crate::host::Renderer;
use crate::scheduler::{Scheduler, Task, TaskKey};
use crate::{Toast, ToastState};
use tracing::trace;

/// Pending timer tasks of one toast
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    expire: Option<TaskKey>,
    tick: Option<TaskKey>,
}

impl Countdown {
    pub fn is_active(&self) -> bool {
        self.expire.is_some()
    }

    pub fn is_ticking(&self) -> bool {
        self.tick.is_some()
    }
}

/// Width of the duration bar after `elapsed` of `duration` milliseconds,
/// rounded down.
pub fn remaining_bar_width(total_width: i32, elapsed: u64, duration: u64) -> i32 {
    if duration == 0 {
        return total_width;
    }
    let total = u128::from(total_width.max(0).unsigned_abs());
    let remaining = u128::from(duration.saturating_sub(elapsed));
    // remaining <= duration, so the result never exceeds total_width
    (total * remaining / u128::from(duration)) as i32
}

#[derive(Debug, Clone, Copy)]
pub struct TimerEngine {
    tick_interval: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DURATION_BAR_UPDATE_INTERVAL)
    }
}

impl TimerEngine {
    pub fn new(tick_interval: u64) -> Self {
        Self {
            tick_interval: tick_interval.max(1),
        }
    }

    pub fn tick_interval(&self) -> u64 {
        self.tick_interval
    }

    /// Start a full-length countdown. Toasts with a zero duration never
    /// count down.
    pub fn start(&self, toast: &mut Toast, scheduler: &mut Scheduler, renderer: &mut dyn Renderer) {
        if toast.duration() == 0 {
            return;
        }
        self.cancel(toast, scheduler);

        toast.elapsed_time = 0;
        Self::fill_bar(toast, renderer);

        let expire = scheduler.schedule(toast.duration(), Task::Expire(toast.id()));
        toast.countdown.expire = Some(expire);
        if toast.show_duration_bar() {
            self.schedule_tick(toast, scheduler);
        }
        trace!("Countdown of {}ms started for toast {}", toast.duration(), toast.id());
    }

    /// Drop any pending expiry and tick.
    pub fn cancel(&self, toast: &mut Toast, scheduler: &mut Scheduler) {
        if let Some(key) = toast.countdown.expire.take() {
            scheduler.cancel(key);
        }
        if let Some(key) = toast.countdown.tick.take() {
            scheduler.cancel(key);
        }
    }

    /// The expiry task fired; the countdown is no longer active.
    pub fn on_expired(&self, toast: &mut Toast) {
        toast.countdown.expire = None;
    }

    pub fn on_tick(
        &self,
        toast: &mut Toast,
        scheduler: &mut Scheduler,
        renderer: &mut dyn Renderer,
    ) {
        toast.countdown.tick = None;
        if toast.state() != ToastState::Showing {
            return;
        }

        toast.elapsed_time = (toast.elapsed_time + self.tick_interval).min(toast.duration());
        if toast.elapsed_time >= toast.duration() {
            return;
        }

        let width = remaining_bar_width(
            toast.measured_size().width,
            toast.elapsed_time,
            toast.duration(),
        );
        toast.duration_bar_width = width;
        renderer.set_duration_bar_width(toast.id(), width);

        self.schedule_tick(toast, scheduler);
    }

    /// Returns whether the countdown was reset.
    pub fn on_hover_enter(
        &self,
        toast: &mut Toast,
        scheduler: &mut Scheduler,
        renderer: &mut dyn Renderer,
    ) -> bool {
        if !toast.reset_on_hover()
            || toast.state() != ToastState::Showing
            || !toast.countdown.is_active()
        {
            return false;
        }

        self.cancel(toast, scheduler);
        toast.elapsed_time = 0;
        Self::fill_bar(toast, renderer);
        trace!("Countdown of toast {} reset by hover", toast.id());
        true
    }

    /// Returns whether a fresh countdown was started.
    pub fn on_hover_leave(
        &self,
        toast: &mut Toast,
        scheduler: &mut Scheduler,
        renderer: &mut dyn Renderer,
    ) -> bool {
        if !toast.reset_on_hover()
            || toast.state() != ToastState::Showing
            || toast.duration() == 0
            || toast.countdown.is_active()
        {
            return false;
        }

        self.start(toast, scheduler, renderer);
        true
    }

    fn schedule_tick(&self, toast: &mut Toast, scheduler: &mut Scheduler) {
        let tick = scheduler.schedule(self.tick_interval, Task::DurationBarTick(toast.id()));
        toast.countdown.tick = Some(tick);
    }

    fn fill_bar(toast: &mut Toast, renderer: &mut dyn Renderer) {
        if !toast.show_duration_bar() {
            return;
        }
        toast.duration_bar_width = toast.measured_size().width;
        renderer.set_duration_bar_width(toast.id(), toast.duration_bar_width);
    }
}
