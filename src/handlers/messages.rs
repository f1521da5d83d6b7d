use serde::Serialize;
use toast_stack_core::{Event, Point, ToastId, ToastState};

/// Requests for the daemon loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Show a new toast
    Toast {
        duration: u64,
        title: String,
        text: String,
    },
    /// Dismiss a shown or queued toast
    Dismiss(ToastId),
    /// Pointer entered a toast
    HoverEnter(ToastId),
    /// Pointer left a toast
    HoverLeave(ToastId),
    /// Change the stacking preset by name
    Position(String),
    /// Change how many toasts may be on screen
    Maximum(u32),
    /// Report what is on screen
    Status,
    /// Close everything and stop
    Quit,
}

/// Lines written back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Event(Event),
    Status(StatusReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub now: u64,
    pub visible: Vec<ToastSummary>,
    pub queued: Vec<ToastId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastSummary {
    pub id: ToastId,
    pub title: String,
    pub state: ToastState,
    pub position: Point,
    pub elapsed: u64,
}
