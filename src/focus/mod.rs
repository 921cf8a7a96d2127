//! Focus sessions and Pomodoro cycles.
//!
//! - Countdown timer and session bookkeeping
//! - Session controller (Do Not Disturb + Dock + countdown)
//! - Pomodoro phases on top of it
//! - Foreground run loop and prompts
//! - PID-file background variant

pub mod controller;
pub mod legacy;
pub mod pomodoro;
pub mod prompt;
pub mod runner;
pub mod session;
pub mod timer;

pub use controller::{SessionController, TickOutcome};
pub use legacy::{LegacyFocus, PidFile};
pub use pomodoro::{PomodoroController, PomodoroPlan, PomodoroState, PomodoroTick};
pub use prompt::{parse_positive, prompt_positive};
pub use runner::{run_until_done, RunOutcome};
pub use session::{time_left_label, FocusState, Session};
pub use timer::{format_minutes, render_progress_bar, CountdownTimer};
