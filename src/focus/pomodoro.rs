//! Pomodoro cycles on top of the session controller.
//!
//! A plan alternates focus and break sessions. The remaining count drops
//! once per completed focus phase, never during a break, so a plan of N
//! sessions runs N focus phases separated by N - 1 breaks.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::controller::{SessionController, TickOutcome};
use crate::error::AlfredError;
use crate::menu::MenuPresenter;
use crate::system::FocusBackend;

/// Where a Pomodoro run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroState {
    Idle,
    Focusing,
    Breaking,
    Terminated,
}

impl std::fmt::Display for PomodoroState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Focusing => write!(f, "Focus"),
            Self::Breaking => write!(f, "Break"),
            Self::Terminated => write!(f, "Finished"),
        }
    }
}

/// Lengths and progress of a Pomodoro run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroPlan {
    pub session_minutes: u32,
    pub break_minutes: u32,
    pub total_sessions: u32,
    pub sessions_remaining: u32,
    pub is_break_phase: bool,
}

impl PomodoroPlan {
    /// Validate and build a plan.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::InvalidDuration` if any value is zero.
    pub fn new(
        session_minutes: u32,
        total_sessions: u32,
        break_minutes: u32,
    ) -> Result<Self, AlfredError> {
        for (name, value) in [
            ("session length", session_minutes),
            ("number of sessions", total_sessions),
            ("break length", break_minutes),
        ] {
            if value == 0 {
                return Err(AlfredError::InvalidDuration(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        Ok(Self {
            session_minutes,
            break_minutes,
            total_sessions,
            sessions_remaining: total_sessions,
            is_break_phase: false,
        })
    }

    /// Length of the phase the plan is currently in.
    #[must_use]
    pub const fn phase_minutes(&self) -> u32 {
        if self.is_break_phase {
            self.break_minutes
        } else {
            self.session_minutes
        }
    }
}

/// Result of a Pomodoro tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroTick {
    /// Nothing is running.
    Idle,
    /// The current phase continues.
    Running { remaining: u32 },
    /// A phase finished and the next one started.
    PhaseChanged(PomodoroState),
    /// The last focus phase finished; the plan is over.
    Finished,
}

/// Drives a [`SessionController`] through alternating phases.
///
/// Plain focus sessions can still be started through
/// [`PomodoroController::sessions_mut`]; ticks are forwarded either way.
pub struct PomodoroController<B, P> {
    sessions: SessionController<B, P>,
    plan: Option<PomodoroPlan>,
    state: PomodoroState,
}

impl<B: FocusBackend, P: MenuPresenter> PomodoroController<B, P> {
    pub const fn new(sessions: SessionController<B, P>) -> Self {
        Self {
            sessions,
            plan: None,
            state: PomodoroState::Idle,
        }
    }

    /// Set the plan for the next run.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::InvalidDuration` for a zero value (the
    /// controller stays where it was) or `AlfredError::AlreadyRunning`
    /// while a run is in progress.
    pub fn configure(
        &mut self,
        session_minutes: u32,
        total_sessions: u32,
        break_minutes: u32,
    ) -> Result<(), AlfredError> {
        if self.is_running() {
            return Err(AlfredError::AlreadyRunning);
        }
        let plan = PomodoroPlan::new(session_minutes, total_sessions, break_minutes)?;

        self.plan = Some(plan);
        self.state = PomodoroState::Idle;
        Ok(())
    }

    /// Begin the configured run with its first focus phase.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::NotConfigured` unless a fresh plan is waiting,
    /// or `AlfredError::AlreadyRunning` if any session is active.
    pub fn begin(&mut self) -> Result<(), AlfredError> {
        if self.sessions.is_active() {
            return Err(AlfredError::AlreadyRunning);
        }
        if self.state != PomodoroState::Idle {
            return Err(AlfredError::NotConfigured);
        }
        let Some(plan) = self.plan.as_mut() else {
            return Err(AlfredError::NotConfigured);
        };

        plan.sessions_remaining = plan.total_sessions;
        plan.is_break_phase = false;
        let minutes = plan.session_minutes;
        let total = plan.total_sessions;

        tracing::info!(minutes, sessions = total, "beginning pomodoro");
        self.sessions.start(minutes)?;
        self.state = PomodoroState::Focusing;
        Ok(())
    }

    /// Advance by one second, switching phase when one expires.
    pub fn tick(&mut self) -> PomodoroTick {
        match self.sessions.tick() {
            TickOutcome::Idle => PomodoroTick::Idle,
            TickOutcome::Running { remaining } => PomodoroTick::Running { remaining },
            TickOutcome::Expired if self.is_running() => self.complete_phase(),
            TickOutcome::Expired => PomodoroTick::Idle,
        }
    }

    /// Apply every tick due by `now` and return the last one.
    ///
    /// Stops early at a phase change or at the end of the plan: the new
    /// phase is armed from the current time, so leftover ticks belong to
    /// the next call.
    pub fn tick_due(&mut self, now: Instant) -> Option<PomodoroTick> {
        let mut last = None;
        for _ in 0..self.due_ticks(now) {
            let tick = self.tick();
            last = Some(tick);
            if matches!(tick, PomodoroTick::PhaseChanged(_) | PomodoroTick::Finished) {
                break;
            }
        }
        last
    }

    /// Terminate the run and any active session.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::NotRunning` if neither a run nor a session is
    /// active.
    pub fn end(&mut self) -> Result<(), AlfredError> {
        if !self.is_running() && !self.sessions.is_active() {
            return Err(AlfredError::NotRunning);
        }

        self.sessions.stop();
        if self.is_running() {
            tracing::info!("pomodoro ended early");
            self.state = PomodoroState::Terminated;
        }
        Ok(())
    }

    /// Number of ticks due by `now`.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        self.sessions.due_ticks(now)
    }

    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.sessions.time_until_next_tick(now)
    }

    #[must_use]
    pub const fn state(&self) -> PomodoroState {
        self.state
    }

    #[must_use]
    pub const fn plan(&self) -> Option<&PomodoroPlan> {
        self.plan.as_ref()
    }

    /// Whether a run is in a focus or break phase.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, PomodoroState::Focusing | PomodoroState::Breaking)
    }

    pub const fn sessions(&self) -> &SessionController<B, P> {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionController<B, P> {
        &mut self.sessions
    }

    fn complete_phase(&mut self) -> PomodoroTick {
        let Some(plan) = self.plan.as_mut() else {
            self.state = PomodoroState::Terminated;
            return PomodoroTick::Finished;
        };

        if plan.is_break_phase {
            plan.is_break_phase = false;
        } else {
            plan.sessions_remaining = plan.sessions_remaining.saturating_sub(1);
            if plan.sessions_remaining > 0 {
                plan.is_break_phase = true;
            }
        }

        if plan.sessions_remaining == 0 {
            tracing::info!("pomodoro finished");
            self.state = PomodoroState::Terminated;
            self.sessions.presenter_mut().notify("Pomodoro complete");
            return PomodoroTick::Finished;
        }

        let minutes = plan.phase_minutes();
        let remaining = plan.sessions_remaining;
        let next = if plan.is_break_phase {
            PomodoroState::Breaking
        } else {
            PomodoroState::Focusing
        };

        tracing::info!(
            phase = %next,
            minutes,
            sessions_remaining = remaining,
            "pomodoro phase change"
        );
        if let Err(e) = self.sessions.start(minutes) {
            tracing::warn!(error = %e, "could not start next pomodoro phase");
            self.state = PomodoroState::Terminated;
            self.sessions.presenter_mut().notify(&e.to_string());
            return PomodoroTick::Finished;
        }

        self.state = next;
        let message = match next {
            PomodoroState::Breaking => format!("Break: {minutes} min"),
            _ => format!(
                "Focus: {minutes} min ({remaining} session{} left)",
                if remaining == 1 { "" } else { "s" }
            ),
        };
        self.sessions.presenter_mut().notify(&message);
        PomodoroTick::PhaseChanged(next)
    }
}
