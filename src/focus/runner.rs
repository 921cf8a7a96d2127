//! Blocking loop for foreground focus runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::pomodoro::PomodoroController;
use crate::menu::MenuPresenter;
use crate::system::FocusBackend;

/// Longest single sleep, so a cancel request is noticed promptly.
const MAX_WAIT: Duration = Duration::from_millis(200);

/// How a foreground run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOutcome {
    /// The session or plan ran to the end.
    Completed,
    /// The cancel flag was raised first.
    Cancelled,
}

/// Tick `controller` in real time until nothing is running or `cancel` is
/// set. Cancelling ends the run through the same stop path as expiry.
pub fn run_until_done<B, P>(
    controller: &mut PomodoroController<B, P>,
    cancel: &AtomicBool,
) -> RunOutcome
where
    B: FocusBackend,
    P: MenuPresenter,
{
    loop {
        if cancel.load(Ordering::SeqCst) {
            controller.end().ok();
            return RunOutcome::Cancelled;
        }

        controller.tick_due(Instant::now());

        if !controller.is_running() && !controller.sessions().is_active() {
            return RunOutcome::Completed;
        }

        let wait = controller
            .time_until_next_tick(Instant::now())
            .map_or(MAX_WAIT, |d| d.min(MAX_WAIT));
        thread::sleep(wait);
    }
}
