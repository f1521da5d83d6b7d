//! Fade and slide transitions.
//!
//! Animations are linear. While any animation runs, a frame task pushes
//! intermediate values every [`FRAME_INTERVAL`] milliseconds, and each
//! animation owns a completion task due exactly at its end so lifecycle
//! transitions never depend on frame timing.
//!
//! A toast has at most one opacity and one position animation at a time.
//! Starting a new one replaces the old one, which then never completes.

use crate::constants::{FRAME_INTERVAL, SLIDE_DISTANCE_DIVISOR};
use crate::geometry::Point;
use crate::host::Renderer;
use crate::scheduler::{Scheduler, Task, TaskKey};
use crate::{Toast, ToastId};
use toast_stack_config::ToastPosition;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// A value pushed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Opacity(f32),
    Position(Point),
}

/// What the stack manager must do once an animation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Nothing,
    ExitFinished,
}

/// A completed animation, carrying its final value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finished {
    pub toast: ToastId,
    pub sample: Sample,
    pub completion: Completion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Property {
    Opacity { from: f32, to: f32 },
    Position { from: Point, to: Point },
}

impl Property {
    fn same_kind(&self, other: &Property) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn at(&self, t: f64) -> Sample {
        match *self {
            Property::Opacity { from, to } => Sample::Opacity(from + (to - from) * t as f32),
            Property::Position { from, to } => Sample::Position(Point::new(
                lerp(from.x, to.x, t),
                lerp(from.y, to.y, t),
            )),
        }
    }
}

fn lerp(from: i32, to: i32, t: f64) -> i32 {
    (f64::from(from) + f64::from(to - from) * t).round() as i32
}

#[derive(Debug, Clone)]
struct Animation {
    id: AnimationId,
    toast: ToastId,
    property: Property,
    started_at: u64,
    duration: u64,
    finish: TaskKey,
    completion: Completion,
}

impl Animation {
    fn sample(&self, now: u64) -> Sample {
        if self.duration == 0 {
            return self.property.at(1.0);
        }
        let t = now.saturating_sub(self.started_at) as f64 / self.duration as f64;
        self.property.at(t.clamp(0.0, 1.0))
    }
}

/// Push a sample into the toast's cached state and on to the renderer.
pub fn apply(toast: &mut Toast, sample: Sample, renderer: &mut dyn Renderer) {
    match sample {
        Sample::Opacity(opacity) => {
            toast.opacity = opacity.clamp(0.0, 1.0);
            renderer.set_opacity(toast.id(), toast.opacity);
        }
        Sample::Position(position) => {
            toast.position = position;
            renderer.set_position(toast.id(), position);
        }
    }
}

/// Where a non-first toast starts its entrance slide.
///
/// Bottom anchored stacks slide in from above the final spot, top anchored
/// stacks from below it, by two thirds of the toast's outer height.
pub fn slide_origin(position: ToastPosition, target: Point, outer_height: i32) -> Point {
    let distance = (f64::from(outer_height) / SLIDE_DISTANCE_DIVISOR) as i32;
    if position.is_bottom() {
        Point::new(target.x, target.y - distance)
    } else {
        Point::new(target.x, target.y + distance)
    }
}

#[derive(Debug, Default)]
pub struct AnimationCoordinator {
    next_id: u64,
    animations: Vec<Animation>,
    frame: Option<TaskKey>,
}

impl AnimationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fade the toast in, sliding it from `slide_from` when given.
    pub fn entrance(
        &mut self,
        toast: &mut Toast,
        target: Point,
        slide_from: Option<Point>,
        scheduler: &mut Scheduler,
        renderer: &mut dyn Renderer,
    ) {
        let duration = toast.fade_in_duration();

        match slide_from {
            Some(start) => {
                apply(toast, Sample::Position(start), renderer);
                self.start(
                    toast.id(),
                    Property::Position { from: start, to: target },
                    duration,
                    Completion::Nothing,
                    scheduler,
                );
            }
            None => apply(toast, Sample::Position(target), renderer),
        }

        apply(toast, Sample::Opacity(0.0), renderer);
        renderer.show(toast.id());
        self.start(
            toast.id(),
            Property::Opacity { from: 0.0, to: 1.0 },
            duration,
            Completion::Nothing,
            scheduler,
        );
    }

    /// Move an already shown toast to `target` over its fade-out duration.
    ///
    /// Returns `false` when the toast is already at, or heading to, `target`.
    pub fn reposition(&mut self, toast: &Toast, target: Point, scheduler: &mut Scheduler) -> bool {
        let heading_to = self
            .animations
            .iter()
            .find_map(|a| match a.property {
                Property::Position { to, .. } if a.toast == toast.id() => Some(to),
                _ => None,
            })
            .unwrap_or(toast.position());
        if heading_to == target {
            return false;
        }

        self.start(
            toast.id(),
            Property::Position { from: toast.position(), to: target },
            toast.fade_out_duration(),
            Completion::Nothing,
            scheduler,
        );
        true
    }

    /// Fade the toast out. Completion is reported as [`Completion::ExitFinished`].
    pub fn exit(&mut self, toast: &Toast, scheduler: &mut Scheduler) {
        self.start(
            toast.id(),
            Property::Opacity { from: 1.0, to: 0.0 },
            toast.fade_out_duration(),
            Completion::ExitFinished,
            scheduler,
        );
    }

    /// Intermediate values for every running animation.
    pub fn on_frame(&mut self, scheduler: &mut Scheduler) -> Vec<(ToastId, Sample)> {
        self.frame = None;
        let now = scheduler.now();
        let samples: Vec<_> = self.animations.iter().map(|a| (a.toast, a.sample(now))).collect();
        self.ensure_frame(scheduler);
        samples
    }

    /// The completion task of `id` fired.
    pub fn on_finished(&mut self, id: AnimationId, scheduler: &mut Scheduler) -> Option<Finished> {
        let pos = self.animations.iter().position(|a| a.id == id)?;
        let animation = self.animations.remove(pos);
        if self.animations.is_empty() {
            self.stop_frames(scheduler);
        }
        trace!("Animation {:?} of toast {} finished", animation.id, animation.toast);
        Some(Finished {
            toast: animation.toast,
            sample: animation.property.at(1.0),
            completion: animation.completion,
        })
    }

    /// Drop every animation of a toast without completing it.
    pub fn cancel_toast(&mut self, toast: ToastId, scheduler: &mut Scheduler) {
        self.animations.retain(|a| {
            if a.toast == toast {
                scheduler.cancel(a.finish);
                false
            } else {
                true
            }
        });
        if self.animations.is_empty() {
            self.stop_frames(scheduler);
        }
    }

    pub fn clear(&mut self, scheduler: &mut Scheduler) {
        for animation in self.animations.drain(..) {
            scheduler.cancel(animation.finish);
        }
        self.stop_frames(scheduler);
    }

    pub fn is_animating(&self, toast: ToastId) -> bool {
        self.animations.iter().any(|a| a.toast == toast)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    fn start(
        &mut self,
        toast: ToastId,
        property: Property,
        duration: u64,
        completion: Completion,
        scheduler: &mut Scheduler,
    ) {
        self.animations.retain(|a| {
            if a.toast == toast && a.property.same_kind(&property) {
                scheduler.cancel(a.finish);
                false
            } else {
                true
            }
        });

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        let finish = scheduler.schedule(duration, Task::AnimationFinished(id));
        self.animations.push(Animation {
            id,
            toast,
            property,
            started_at: scheduler.now(),
            duration,
            finish,
            completion,
        });
        self.ensure_frame(scheduler);
    }

    fn ensure_frame(&mut self, scheduler: &mut Scheduler) {
        if self.frame.is_none() && !self.animations.is_empty() {
            self.frame = Some(scheduler.schedule(FRAME_INTERVAL, Task::AnimationFrame));
        }
    }

    fn stop_frames(&mut self, scheduler: &mut Scheduler) {
        if let Some(key) = self.frame.take() {
            scheduler.cancel(key);
        }
    }
}
