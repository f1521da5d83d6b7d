//! Deterministic task queue driving every deferred transition.
//!
//! The scheduler keeps a virtual clock in milliseconds. Nothing here sleeps:
//! an outer event loop asks for [`Scheduler::next_deadline`], waits however it
//! likes, and then drains due tasks through the stack manager. Tasks due at
//! the same instant are delivered in the order they were scheduled.

use crate::animation::AnimationId;
use crate::ToastId;
use std::collections::BTreeMap;

/// Handle to a scheduled task, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskKey {
    due: u64,
    seq: u64,
}

impl TaskKey {
    pub fn due(&self) -> u64 {
        self.due
    }
}

/// Deferred work, each variant has exactly one handler in the stack manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// The auto-dismiss countdown of a toast ran out
    Expire(ToastId),
    /// Advance the duration bar of a toast by one interval
    DurationBarTick(ToastId),
    /// Push intermediate values for every running animation
    AnimationFrame,
    /// An animation reached its end value
    AnimationFinished(AnimationId),
    /// Try to move one queued toast onto the screen
    PromoteFromQueue,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    tasks: BTreeMap<TaskKey, Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay: u64, task: Task) -> TaskKey {
        let key = TaskKey {
            due: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.tasks.insert(key, task);
        key
    }

    /// Returns whether the task was still pending
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        self.tasks.remove(&key).is_some()
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.tasks.contains_key(&key)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.tasks.first_key_value().map(|(key, _)| key.due)
    }

    /// Remove the earliest task due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<(TaskKey, Task)> {
        let entry = self.tasks.first_entry()?;
        if entry.key().due > until {
            return None;
        }
        let (key, task) = entry.remove_entry();
        self.now = self.now.max(key.due);
        Some((key, task))
    }

    /// Move the clock forward. The clock never goes backwards.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_pop_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(30, Task::PromoteFromQueue);
        scheduler.schedule(10, Task::AnimationFrame);

        assert_eq!(scheduler.next_deadline(), Some(10));
        assert_eq!(scheduler.pop_due(100).map(|(_, t)| t), Some(Task::AnimationFrame));
        assert_eq!(scheduler.now(), 10);
        assert_eq!(scheduler.pop_due(100).map(|(_, t)| t), Some(Task::PromoteFromQueue));
        assert_eq!(scheduler.now(), 30);
        assert!(scheduler.pop_due(100).is_none());
    }

    #[test]
    fn test_same_deadline_keeps_scheduling_order() {
        let mut scheduler = Scheduler::new();
        let id = ToastId::from(7);
        scheduler.schedule(10, Task::Expire(id));
        scheduler.schedule(10, Task::DurationBarTick(id));

        assert_eq!(scheduler.pop_due(10).map(|(_, t)| t), Some(Task::Expire(id)));
        assert_eq!(scheduler.pop_due(10).map(|(_, t)| t), Some(Task::DurationBarTick(id)));
    }

    #[test]
    fn test_pop_due_respects_limit() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(50, Task::PromoteFromQueue);

        assert!(scheduler.pop_due(49).is_none());
        assert_eq!(scheduler.now(), 0);
        assert!(scheduler.pop_due(50).is_some());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let key = scheduler.schedule(5, Task::PromoteFromQueue);

        assert!(scheduler.is_pending(key));
        assert!(scheduler.cancel(key));
        assert!(!scheduler.cancel(key));
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_clock(100);
        let key = scheduler.schedule(25, Task::AnimationFrame);
        assert_eq!(key.due(), 125);

        scheduler.advance_clock(50);
        assert_eq!(scheduler.now(), 100);
    }
}
