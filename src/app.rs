// Event loop driving the stack manager
// ====================================
//
// The engine keeps a virtual millisecond clock and never sleeps on its own.
// This loop maps that clock onto tokio time: virtual time 0 is the moment the
// daemon was created, and the loop sleeps until the engine's next deadline or
// the next input, whichever comes first. Before any input is handled the clock
// is brought up to date so new timers start from the real current time.

use crate::handlers::{Input, Output, StatusReport, ToastSummary};
use std::time::Duration;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Instant, sleep_until};
use toast_stack_core::{Host, Renderer, StackManager, Toast};
use tracing::{debug, info, warn};

pub struct ToastDaemon<R, H> {
    manager: StackManager<R, H>,
    epoch: Instant,
    output: Sender<Output>,
}

impl<R: Renderer, H: Host> ToastDaemon<R, H> {
    pub fn new(manager: StackManager<R, H>, output: Sender<Output>) -> Self {
        Self {
            manager,
            epoch: Instant::now(),
            output,
        }
    }

    /// Run until `Quit` arrives or every input sender is gone.
    pub async fn run(mut self, mut input: Receiver<Input>) -> StackManager<R, H> {
        loop {
            let deadline = self.deadline();
            tokio::select! {
                next = input.recv() => {
                    self.sync_clock();
                    match next {
                        Some(Input::Quit) | None => break,
                        Some(next) => self.handle(next).await,
                    }
                }
                _ = sleep_until(deadline.unwrap_or(self.epoch)), if deadline.is_some() => {
                    self.sync_clock();
                }
            }
            self.flush().await;
        }

        info!("Shutting down, closing {} toasts", self.manager.count());
        self.manager.close_all();
        self.flush().await;
        self.manager
    }

    async fn handle(&mut self, input: Input) {
        match input {
            Input::Toast {
                duration,
                title,
                text,
            } => {
                let id = self
                    .manager
                    .submit(Toast::new(title, text).with_duration(duration));
                debug!("Submitted toast {}", id);
            }
            Input::Dismiss(id) => {
                if !self.manager.dismiss(id) {
                    warn!("Toast {} is not dismissable", id);
                }
            }
            Input::HoverEnter(id) => {
                self.manager.on_hover_enter(id);
            }
            Input::HoverLeave(id) => {
                self.manager.on_hover_leave(id);
            }
            Input::Position(name) => {
                self.manager.set_position_name(&name);
            }
            Input::Maximum(maximum) => self.manager.set_maximum_on_screen(maximum),
            Input::Status => {
                let report = self.status();
                _ = self.output.send(Output::Status(report)).await;
            }
            Input::Quit => {}
        }
    }

    fn status(&self) -> StatusReport {
        StatusReport {
            now: self.manager.now(),
            visible: self
                .manager
                .visible()
                .iter()
                .map(|toast| ToastSummary {
                    id: toast.id(),
                    title: toast.title().to_string(),
                    state: toast.state(),
                    position: toast.position(),
                    elapsed: toast.elapsed_time(),
                })
                .collect(),
            queued: self.manager.queued().map(Toast::id).collect(),
        }
    }

    async fn flush(&mut self) {
        for event in self.manager.drain_events() {
            _ = self.output.send(Output::Event(event)).await;
        }
    }

    fn deadline(&self) -> Option<Instant> {
        self.manager
            .next_deadline()
            .map(|ms| self.epoch + Duration::from_millis(ms))
    }

    fn sync_clock(&mut self) {
        let now = u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.manager.advance_to(now);
    }
}
