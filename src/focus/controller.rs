//! The focus-session state machine.
//!
//! A [`SessionController`] ties Do Not Disturb, the Dock toggle and the
//! countdown together. At most one session is active; the controller is
//! the only writer of session state and is driven from a single thread.

use std::time::{Duration, Instant};

use super::session::{FocusState, Session};
use super::timer::CountdownTimer;
use crate::error::AlfredError;
use crate::menu::MenuPresenter;
use crate::system::FocusBackend;

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No session is active.
    Idle,
    /// The session continues with this many seconds left.
    Running { remaining: u32 },
    /// The session reached its target on this tick and has been stopped.
    Expired,
}

/// Runs one focus session at a time.
pub struct SessionController<B, P> {
    backend: B,
    presenter: P,
    timer: CountdownTimer,
    session: Option<Session>,
    focus: FocusState,
}

impl<B: FocusBackend, P: MenuPresenter> SessionController<B, P> {
    /// Create an idle controller and put the presenter in its idle layout.
    pub fn new(backend: B, mut presenter: P) -> Self {
        presenter.set_start_enabled(true);
        presenter.set_end_enabled(false);
        presenter.hide_time_left();

        Self {
            backend,
            presenter,
            timer: CountdownTimer::every_second(),
            session: None,
            focus: FocusState::Off,
        }
    }

    /// Start a focus session of `minutes`.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::AlreadyRunning` if a session is active (it is
    /// left untouched) or `AlfredError::InvalidDuration` for zero minutes.
    pub fn start(&mut self, minutes: u32) -> Result<(), AlfredError> {
        self.start_at(minutes, Instant::now())
    }

    /// Start a session with the timer armed from `now`.
    ///
    /// # Errors
    ///
    /// See [`SessionController::start`].
    pub fn start_at(&mut self, minutes: u32, now: Instant) -> Result<(), AlfredError> {
        if self.session.is_some() {
            return Err(AlfredError::AlreadyRunning);
        }
        let session = Session::from_minutes(minutes)?;

        tracing::info!(minutes, "starting focus session");
        let dnd = self.backend.set_dnd(FocusState::On, minutes);
        self.report(dnd);
        let dock = self.backend.toggle_dock();
        self.report(dock);

        self.focus = FocusState::On;
        self.session = Some(session);
        self.timer.arm(now);

        self.presenter.set_start_enabled(false);
        self.presenter.set_end_enabled(true);
        self.presenter.show_time_left(&session.label());
        Ok(())
    }

    /// Advance the active session by one second.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };

        let expired = session.advance();
        let remaining = session.remaining_seconds();
        let label = session.label();
        self.presenter.show_time_left(&label);

        if expired {
            tracing::info!("focus session finished");
            self.stop();
            TickOutcome::Expired
        } else {
            TickOutcome::Running { remaining }
        }
    }

    /// Stop the active session. Does nothing when idle.
    pub fn stop(&mut self) {
        if self.session.is_none() && !self.timer.is_armed() {
            return;
        }

        tracing::info!("stopping focus session");
        let dnd = self.backend.set_dnd(FocusState::Off, 0);
        self.report(dnd);
        let dock = self.backend.toggle_dock();
        self.report(dock);

        self.timer.disarm();
        self.session = None;
        self.focus = FocusState::Off;

        self.presenter.set_start_enabled(true);
        self.presenter.set_end_enabled(false);
        self.presenter.hide_time_left();
    }

    /// Stop the active session on explicit request.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::NotRunning` if no session is active.
    pub fn end(&mut self) -> Result<(), AlfredError> {
        if self.session.is_none() {
            return Err(AlfredError::NotRunning);
        }
        self.stop();
        Ok(())
    }

    /// Number of ticks due by `now`.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        self.timer.poll(now)
    }

    /// How long the event loop may wait before the next tick.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_next(now)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Seconds left in the active session.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.session.as_ref().map(Session::remaining_seconds)
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn focus_state(&self) -> FocusState {
        self.focus
    }

    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Log and surface a failed system request without failing the session.
    fn report(&mut self, result: Result<(), AlfredError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "system request failed");
            self.presenter.notify(&e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::menu::MenuState;
    use crate::system::MockFocusBackend;

    fn quiet_backend() -> MockFocusBackend {
        let mut backend = MockFocusBackend::new();
        backend.expect_set_dnd().returning(|_, _| Ok(()));
        backend.expect_toggle_dock().returning(|| Ok(()));
        backend
    }

    fn controller() -> SessionController<MockFocusBackend, MenuState> {
        SessionController::new(quiet_backend(), MenuState::new())
    }

    #[test]
    fn test_start_sets_full_remaining() {
        for minutes in [1, 5, 25, 90] {
            let mut ctl = controller();
            ctl.start(minutes).unwrap();
            assert_eq!(ctl.remaining(), Some(minutes * 60));
            assert_eq!(ctl.focus_state(), FocusState::On);
        }
    }

    #[test]
    fn test_runs_to_zero() {
        let mut ctl = controller();
        ctl.start(5).unwrap();

        for _ in 0..(5 * 60 - 1) {
            assert!(matches!(ctl.tick(), TickOutcome::Running { .. }));
        }
        assert_eq!(ctl.remaining(), Some(1));
        assert_eq!(ctl.tick(), TickOutcome::Expired);
        assert!(!ctl.is_active());
        assert_eq!(ctl.focus_state(), FocusState::Off);
    }

    #[test]
    fn test_start_updates_menu() {
        let mut ctl = controller();
        ctl.start(10).unwrap();

        let menu = ctl.presenter();
        assert!(!menu.start_enabled);
        assert!(menu.end_enabled);
        assert_eq!(menu.time_left.as_deref(), Some("10 min"));
    }

    #[test]
    fn test_start_issues_requests_once() {
        let mut backend = MockFocusBackend::new();
        backend
            .expect_set_dnd()
            .with(eq(FocusState::On), eq(30))
            .times(1)
            .returning(|_, _| Ok(()));
        backend.expect_toggle_dock().times(1).returning(|| Ok(()));

        let mut ctl = SessionController::new(backend, MenuState::new());
        ctl.start(30).unwrap();
    }

    #[test]
    fn test_one_minute_scenario() {
        let mut backend = MockFocusBackend::new();
        backend
            .expect_set_dnd()
            .with(eq(FocusState::On), eq(1))
            .times(1)
            .returning(|_, _| Ok(()));
        backend
            .expect_set_dnd()
            .with(eq(FocusState::Off), eq(0))
            .times(1)
            .returning(|_, _| Ok(()));
        // One toggle to hide, one to restore.
        backend.expect_toggle_dock().times(2).returning(|| Ok(()));

        let mut ctl = SessionController::new(backend, MenuState::new());
        ctl.start(1).unwrap();

        for _ in 0..59 {
            ctl.tick();
        }
        assert!(ctl.is_active());
        assert_eq!(ctl.presenter().time_left.as_deref(), Some("< 1 min"));

        assert_eq!(ctl.tick(), TickOutcome::Expired);
        assert!(!ctl.is_active());
        assert!(ctl.presenter().time_left.is_none());
        assert!(ctl.presenter().start_enabled);
        assert!(!ctl.presenter().end_enabled);
    }

    #[test]
    fn test_label_floors() {
        let mut ctl = controller();
        ctl.start(2).unwrap();

        ctl.tick();
        assert_eq!(ctl.presenter().time_left.as_deref(), Some("1 min"));

        for _ in 0..60 {
            ctl.tick();
        }
        assert_eq!(ctl.remaining(), Some(59));
        assert_eq!(ctl.presenter().time_left.as_deref(), Some("< 1 min"));
    }

    #[test]
    fn test_start_while_active_is_rejected() {
        let mut ctl = controller();
        ctl.start(25).unwrap();
        for _ in 0..10 {
            ctl.tick();
        }

        let err = ctl.start(5).unwrap_err();
        assert!(matches!(err, AlfredError::AlreadyRunning));
        assert_eq!(ctl.session().map(Session::elapsed_seconds), Some(10));
        assert_eq!(ctl.session().map(Session::duration_seconds), Some(1500));
    }

    #[test]
    fn test_start_zero_rejected() {
        let mut backend = MockFocusBackend::new();
        backend.expect_set_dnd().never();
        backend.expect_toggle_dock().never();

        let mut ctl = SessionController::new(backend, MenuState::new());
        assert!(matches!(ctl.start(0), Err(AlfredError::InvalidDuration(_))));
        assert!(!ctl.is_active());
        assert!(ctl.presenter().start_enabled);
    }

    #[test]
    fn test_stop_twice_matches_once() {
        let mut backend = MockFocusBackend::new();
        backend.expect_set_dnd().times(2).returning(|_, _| Ok(()));
        backend.expect_toggle_dock().times(2).returning(|| Ok(()));

        let mut ctl = SessionController::new(backend, MenuState::new());
        ctl.start(15).unwrap();

        ctl.stop();
        let after_once = (ctl.presenter().clone(), ctl.focus_state(), ctl.remaining());
        ctl.stop();
        let after_twice = (ctl.presenter().clone(), ctl.focus_state(), ctl.remaining());

        assert_eq!(after_once, after_twice);
        assert_eq!(ctl.focus_state(), FocusState::Off);
        assert!(ctl.presenter().start_enabled);
    }

    #[test]
    fn test_stop_when_idle_issues_nothing() {
        let mut backend = MockFocusBackend::new();
        backend.expect_set_dnd().never();
        backend.expect_toggle_dock().never();

        let mut ctl = SessionController::new(backend, MenuState::new());
        ctl.stop();
        assert!(!ctl.is_active());
    }

    #[test]
    fn test_end_when_idle() {
        let mut ctl = controller();
        assert!(matches!(ctl.end(), Err(AlfredError::NotRunning)));
    }

    #[test]
    fn test_end_option_rearmed_on_each_start() {
        let mut ctl = controller();

        ctl.start(1).unwrap();
        ctl.end().unwrap();
        assert!(!ctl.presenter().end_enabled);

        ctl.start(1).unwrap();
        assert!(ctl.presenter().end_enabled);
        for _ in 0..60 {
            ctl.tick();
        }
        assert!(!ctl.presenter().end_enabled);

        ctl.start(5).unwrap();
        assert!(ctl.presenter().end_enabled);
        assert!(!ctl.presenter().start_enabled);
    }

    #[test]
    fn test_tool_failure_is_not_fatal() {
        let mut backend = MockFocusBackend::new();
        backend
            .expect_set_dnd()
            .returning(|_, _| {
                Err(AlfredError::external(
                    "shortcuts",
                    "The shortcut could not be found",
                ))
            });
        backend.expect_toggle_dock().returning(|| Ok(()));

        let mut ctl = SessionController::new(backend, MenuState::new());
        ctl.start(5).unwrap();

        assert!(ctl.is_active());
        let message = ctl.presenter().message.clone().unwrap();
        assert!(message.contains("could not be found"));
    }

    #[test]
    fn test_due_ticks_follow_timer() {
        let now = Instant::now();
        let mut ctl = controller();
        assert_eq!(ctl.time_until_next_tick(now), None);

        ctl.start_at(1, now).unwrap();
        assert_eq!(ctl.due_ticks(now + Duration::from_secs(3)), 3);

        ctl.stop();
        assert_eq!(ctl.due_ticks(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_started_session_reports_full_duration() {
        let mut ctl = controller();
        ctl.start(1).unwrap();
        assert!(ctl.is_active());
        assert_eq!(ctl.focus_state(), FocusState::On);
        assert_eq!(ctl.remaining(), Some(60));
    }
}
