//! Admission, ordering and lifecycle of every toast.
//!
//! The [`StackManager`] owns the shown stack, the pending queue and the
//! scheduler. It is single-threaded: each public method and each dispatched
//! task runs to completion before the next one starts, so the collections
//! never need locking.

use crate::animation::{self, AnimationCoordinator, Completion};
use crate::constants::HISTORY_LIMIT;
use crate::geometry::{Rect, Size};
use crate::host::{Host, Renderer};
use crate::position;
use crate::scheduler::{Scheduler, Task};
use crate::timer::TimerEngine;
use crate::{Toast, ToastId, ToastState};
use serde::Serialize;
use std::collections::VecDeque;
use toast_stack_config::{QueueDiscipline, ToastPosition, ToastsConfig};
use tracing::{debug, trace};

/// Lifecycle notifications for observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "id", rename_all = "snake_case")]
pub enum Event {
    /// The toast was admitted onto the screen
    Shown(ToastId),
    /// The toast is waiting for a free slot
    Queued(ToastId),
    /// The toast is gone. Emitted exactly once per toast.
    Closed(ToastId),
}

/// Owner of every toast from submission until it closes.
///
/// Drives the timers and animations of shown toasts through a shared
/// [`Scheduler`] and reports lifecycle changes as [`Event`]s.
pub struct StackManager<R, H> {
    config: ToastsConfig,
    renderer: R,
    host: H,
    scheduler: Scheduler,
    timers: TimerEngine,
    animations: AnimationCoordinator,
    /// Shown toasts in display order
    currently_shown: Vec<Toast>,
    /// Toasts waiting for a slot, oldest first
    queue: VecDeque<Toast>,
    /// Recently closed ids, newest last
    history: VecDeque<ToastId>,
    events: VecDeque<Event>,
}

impl<R: Renderer, H: Host> StackManager<R, H> {
    pub fn new(config: ToastsConfig, renderer: R, host: H) -> Self {
        Self {
            config,
            renderer,
            host,
            scheduler: Scheduler::new(),
            timers: TimerEngine::default(),
            animations: AnimationCoordinator::new(),
            currently_shown: Vec::new(),
            queue: VecDeque::new(),
            history: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    /// Hand a toast over to the stack.
    ///
    /// The toast is shown right away when a slot is free, queued otherwise.
    /// Submitting a toast that is already shown, queued or recently closed
    /// does nothing.
    pub fn submit(&mut self, mut toast: Toast) -> ToastId {
        let id = toast.id();
        if self.contains(id) || self.history.contains(&id) {
            debug!("Ignoring repeated submission of toast {id}");
            return id;
        }

        let size = self.renderer.measure(toast.title(), toast.text(), toast.fonts());
        toast.measured_size = size;
        toast.duration_bar_width = size.width;
        self.renderer.resize(id, size);

        if self.has_free_slot() {
            self.admit(toast);
        } else {
            debug!("Stack full, queueing toast {id}");
            self.queue.push_back(toast);
            self.events.push_back(Event::Queued(id));
        }
        id
    }

    /// Start fading a toast out, or drop it from the queue.
    ///
    /// Returns `false` when the toast is unknown, already fading out or
    /// closed.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        if let Some(toast) = self.currently_shown.iter_mut().find(|t| t.id() == id) {
            if toast.state() != ToastState::Showing {
                trace!("Toast {id} is already fading out");
                return false;
            }
            self.timers.cancel(toast, &mut self.scheduler);
            toast.state = ToastState::FadingOut;
            self.animations.exit(toast, &mut self.scheduler);
            debug!("Fading out toast {id}");
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|t| t.id() == id) {
            self.queue.remove(pos);
            debug!("Dropped queued toast {id}");
            self.retire(id);
            return true;
        }

        trace!("Dismiss for unknown or closed toast {id}");
        false
    }

    /// Final step of the exit pipeline: close, restack, and schedule the next
    /// queued toast.
    pub fn on_exit_animation_finished(&mut self, id: ToastId) {
        let Some(index) = self.shown_index(id) else {
            return;
        };

        let mut toast = self.currently_shown.remove(index);
        self.timers.cancel(&mut toast, &mut self.scheduler);
        self.animations.cancel_toast(id, &mut self.scheduler);
        toast.state = ToastState::Closed;
        toast.elapsed_time = 0;
        self.renderer.close(id);
        debug!("Closed toast {id}");
        self.retire(id);

        self.restack(None, true);
        self.scheduler.schedule(toast.fade_in_duration(), Task::PromoteFromQueue);
    }

    pub fn on_hover_enter(&mut self, id: ToastId) -> bool {
        let Some(toast) = self.currently_shown.iter_mut().find(|t| t.id() == id) else {
            return false;
        };
        self.timers.on_hover_enter(toast, &mut self.scheduler, &mut self.renderer)
    }

    pub fn on_hover_leave(&mut self, id: ToastId) -> bool {
        let Some(toast) = self.currently_shown.iter_mut().find(|t| t.id() == id) else {
            return false;
        };
        self.timers.on_hover_leave(toast, &mut self.scheduler, &mut self.renderer)
    }

    /// Run every task due at or before `now`, in order.
    pub fn advance_to(&mut self, now: u64) {
        while let Some((_, task)) = self.scheduler.pop_due(now) {
            self.dispatch(task);
        }
        self.scheduler.advance_clock(now);
    }

    pub fn advance(&mut self, delta: u64) {
        self.advance_to(self.scheduler.now().saturating_add(delta));
    }

    /// Virtual time of the next pending task
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Close every toast at once, without animations.
    pub fn close_all(&mut self) {
        self.animations.clear(&mut self.scheduler);
        self.scheduler.clear();

        let shown: Vec<ToastId> = self.currently_shown.drain(..).map(|t| t.id()).collect();
        for id in shown {
            self.renderer.close(id);
            self.retire(id);
        }
        let queued: Vec<ToastId> = self.queue.drain(..).map(|t| t.id()).collect();
        for id in queued {
            self.retire(id);
        }
        debug!("Closed every toast");
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    // Queries

    pub fn count(&self) -> usize {
        self.currently_shown.len() + self.queue.len()
    }

    pub fn visible_count(&self) -> usize {
        self.currently_shown.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.currently_shown
    }

    pub fn queued(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn toast(&self, id: ToastId) -> Option<&Toast> {
        self.currently_shown
            .iter()
            .chain(self.queue.iter())
            .find(|t| t.id() == id)
    }

    /// `None` for ids never submitted, or closed too long ago to remember.
    pub fn state(&self, id: ToastId) -> Option<ToastState> {
        self.toast(id)
            .map(Toast::state)
            .or_else(|| self.history.contains(&id).then_some(ToastState::Closed))
    }

    pub fn elapsed(&self, id: ToastId) -> Option<u64> {
        self.toast(id).map(Toast::elapsed_time)
    }

    pub fn config(&self) -> &ToastsConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // Settings. Changes apply to the next placement; nothing already on
    // screen moves because of them.

    pub fn set_config(&mut self, config: ToastsConfig) {
        self.config = config;
    }

    pub fn set_maximum_on_screen(&mut self, maximum: u32) {
        self.config.maximum_on_screen = maximum;
    }

    pub fn set_spacing(&mut self, spacing: i32) {
        self.config.spacing = spacing;
    }

    pub fn set_offset_x(&mut self, offset_x: i32) {
        self.config.offset_x = offset_x;
    }

    pub fn set_offset_y(&mut self, offset_y: i32) {
        self.config.offset_y = offset_y;
    }

    pub fn set_offset(&mut self, offset_x: i32, offset_y: i32) {
        self.config.offset_x = offset_x;
        self.config.offset_y = offset_y;
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.config.offset_x, self.config.offset_y)
    }

    pub fn set_always_on_main_screen(&mut self, on: bool) {
        self.config.always_on_main_screen = on;
    }

    pub fn set_position(&mut self, position: ToastPosition) {
        self.config.position = position;
    }

    /// Unrecognized names are ignored. Returns whether the position changed.
    pub fn set_position_name(&mut self, name: &str) -> bool {
        self.config.set_position_name(name)
    }

    pub fn set_queue_discipline(&mut self, discipline: QueueDiscipline) {
        self.config.queue_discipline = discipline;
    }

    fn dispatch(&mut self, task: Task) {
        trace!("Dispatching {:?} at {}ms", task, self.scheduler.now());
        match task {
            Task::Expire(id) => {
                if let Some(toast) = self.currently_shown.iter_mut().find(|t| t.id() == id) {
                    self.timers.on_expired(toast);
                }
                self.dismiss(id);
            }
            Task::DurationBarTick(id) => {
                if let Some(toast) = self.currently_shown.iter_mut().find(|t| t.id() == id) {
                    self.timers.on_tick(toast, &mut self.scheduler, &mut self.renderer);
                }
            }
            Task::AnimationFrame => {
                for (id, sample) in self.animations.on_frame(&mut self.scheduler) {
                    if let Some(toast) = self.currently_shown.iter_mut().find(|t| t.id() == id) {
                        animation::apply(toast, sample, &mut self.renderer);
                    }
                }
            }
            Task::AnimationFinished(animation_id) => {
                let Some(finished) = self
                    .animations
                    .on_finished(animation_id, &mut self.scheduler)
                else {
                    return;
                };
                if let Some(toast) = self
                    .currently_shown
                    .iter_mut()
                    .find(|t| t.id() == finished.toast)
                {
                    animation::apply(toast, finished.sample, &mut self.renderer);
                }
                if finished.completion == Completion::ExitFinished {
                    self.on_exit_animation_finished(finished.toast);
                }
            }
            Task::PromoteFromQueue => self.promote_from_queue(),
        }
    }

    fn admit(&mut self, mut toast: Toast) {
        let id = toast.id();
        toast.state = ToastState::Showing;
        self.currently_shown.push(toast);
        let index = self.currently_shown.len() - 1;

        let screen = self.current_screen();
        let sizes = self.stack_sizes();
        let target = position::calculate_position(&self.config, &sizes, index, screen);

        let toast = &mut self.currently_shown[index];
        self.timers.start(toast, &mut self.scheduler, &mut self.renderer);
        let slide_from = if index > 0 {
            Some(animation::slide_origin(self.config.position, target, toast.outer_size().height))
        } else {
            None
        };
        self.animations
            .entrance(toast, target, slide_from, &mut self.scheduler, &mut self.renderer);

        debug!("Showing toast {id} in slot {index}");
        self.events.push_back(Event::Shown(id));

        self.restack(Some(index), false);
    }

    fn promote_from_queue(&mut self) {
        if !self.has_free_slot() {
            trace!("No free slot for queued toasts");
            return;
        }
        let next = match self.config.queue_discipline {
            QueueDiscipline::Lifo => self.queue.pop_back(),
            QueueDiscipline::Fifo => self.queue.pop_front(),
        };
        if let Some(toast) = next {
            debug!("Promoting queued toast {}", toast.id());
            self.admit(toast);
        }
    }

    /// Move every shown toast except `skip` to its computed slot. With
    /// `vertical_only` each toast keeps its current horizontal coordinate.
    fn restack(&mut self, skip: Option<usize>, vertical_only: bool) {
        let screen = self.current_screen();
        let sizes = self.stack_sizes();

        for (index, toast) in self.currently_shown.iter().enumerate() {
            if Some(index) == skip {
                continue;
            }
            let mut target = position::calculate_position(&self.config, &sizes, index, screen);
            if vertical_only {
                target.x = toast.position().x;
            }
            self.animations.reposition(toast, target, &mut self.scheduler);
        }
    }

    fn retire(&mut self, id: ToastId) {
        self.history.push_back(id);
        if self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.events.push_back(Event::Closed(id));
    }

    fn has_free_slot(&self) -> bool {
        (self.currently_shown.len() as u64) < u64::from(self.config.maximum_on_screen)
    }

    fn contains(&self, id: ToastId) -> bool {
        self.toast(id).is_some()
    }

    fn shown_index(&self, id: ToastId) -> Option<usize> {
        self.currently_shown.iter().position(|t| t.id() == id)
    }

    fn stack_sizes(&self) -> Vec<Size> {
        self.currently_shown.iter().map(Toast::measured_size).collect()
    }

    fn current_screen(&self) -> Rect {
        position::select_screen(
            self.config.always_on_main_screen,
            self.host.host_window_geometry(),
            &self.host.screens(),
            self.host.primary_screen(),
        )
    }
}
