//! Application state for the terminal menu.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::AlfredError;
use crate::focus::{
    parse_positive, PomodoroController, PomodoroState, PomodoroTick, SessionController,
};
use crate::menu::MenuState;
use crate::system::{shortcut, CommandRunner, FocusBackend};

/// Shown after the shortcut file has been opened.
pub const INSTALL_MESSAGE: &str =
    "Focus Shortcut not installed. Click \"Add Shortcut\" when the window pops up \
     and then restart Alfred.";

/// One selectable line of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Start a focus session of this many minutes.
    Focus(u32),
    /// Ask for Pomodoro settings, then begin.
    Pomodoro,
    EndFocus,
    InstallShortcut,
    Quit,
}

impl MenuItem {
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Focus(minutes) => format!("{minutes} min"),
            Self::Pomodoro => "Pomodoro...".to_string(),
            Self::EndFocus => "End Focus".to_string(),
            Self::InstallShortcut => "Install Focus Shortcut".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }
}

/// The three Pomodoro questions, asked in order.
pub const POMODORO_QUESTIONS: [&str; 3] = [
    "Session length (min)",
    "Number of sessions",
    "Break length (min)",
];

/// Pomodoro settings being typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroInput {
    /// Index into [`POMODORO_QUESTIONS`].
    pub step: usize,
    pub answers: Vec<u32>,
    pub buffer: String,
    defaults: [u32; 3],
}

impl PomodoroInput {
    fn new(defaults: [u32; 3]) -> Self {
        Self {
            step: 0,
            answers: Vec::new(),
            buffer: defaults[0].to_string(),
            defaults,
        }
    }

    #[must_use]
    pub fn question(&self) -> &'static str {
        POMODORO_QUESTIONS[self.step.min(POMODORO_QUESTIONS.len() - 1)]
    }
}

/// Application state.
pub struct App<B, R> {
    pub controller: PomodoroController<B, MenuState>,
    pub items: Vec<MenuItem>,
    pub selected: usize,
    /// Active Pomodoro prompt, if any.
    pub input: Option<PomodoroInput>,
    /// Status message to display.
    pub status: Option<String>,
    pub should_quit: bool,
    runner: R,
    shortcut_file: PathBuf,
    pomodoro_defaults: [u32; 3],
}

impl<B: FocusBackend, R: CommandRunner> App<B, R> {
    /// Create a new app instance.
    ///
    /// Without the focus shortcut the menu only offers to install it.
    pub fn new(backend: B, runner: R, config: &Config, shortcut_installed: bool) -> Self {
        let items = if shortcut_installed {
            let mut items: Vec<MenuItem> = config
                .menu
                .focus_lengths
                .iter()
                .map(|&m| MenuItem::Focus(m))
                .collect();
            items.extend([MenuItem::Pomodoro, MenuItem::EndFocus, MenuItem::Quit]);
            items
        } else {
            vec![MenuItem::InstallShortcut, MenuItem::Quit]
        };

        let p = &config.pomodoro;
        Self {
            controller: PomodoroController::new(SessionController::new(backend, MenuState::new())),
            items,
            selected: 0,
            input: None,
            status: Some("Press ? for help".to_string()),
            should_quit: false,
            runner,
            shortcut_file: config.shortcut.file.clone(),
            pomodoro_defaults: [p.session_minutes, p.total_sessions, p.break_minutes],
        }
    }

    /// The menu model the controller writes to.
    pub fn menu(&self) -> &MenuState {
        self.controller.sessions().presenter()
    }

    /// Whether `item` can be chosen right now.
    #[must_use]
    pub fn is_enabled(&self, item: MenuItem) -> bool {
        match item {
            MenuItem::Focus(_) | MenuItem::Pomodoro => self.menu().start_enabled,
            MenuItem::EndFocus => self.menu().end_enabled,
            MenuItem::InstallShortcut | MenuItem::Quit => true,
        }
    }

    /// Label for the header: idle, focus or break.
    #[must_use]
    pub fn phase(&self) -> &'static str {
        match self.controller.state() {
            PomodoroState::Breaking => "Break",
            PomodoroState::Focusing => "Pomodoro",
            _ if self.controller.sessions().is_active() => "Focus",
            _ => "Idle",
        }
    }

    /// Select the next item.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// Select the previous item.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Run the selected item.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures the menu cannot recover from.
    pub fn activate_selected(&mut self) -> Result<(), AlfredError> {
        let Some(&item) = self.items.get(self.selected) else {
            return Ok(());
        };
        if !self.is_enabled(item) {
            return Ok(());
        }

        match item {
            MenuItem::Focus(minutes) => {
                let result = self.controller.sessions_mut().start(minutes);
                if result.is_ok() {
                    self.status = Some(format!("Focus set for {minutes} minute(s)"));
                }
                self.absorb(result)
            }
            MenuItem::Pomodoro => {
                self.input = Some(PomodoroInput::new(self.pomodoro_defaults));
                self.status = Some("Enter to confirm, Esc to cancel".to_string());
                Ok(())
            }
            MenuItem::EndFocus => {
                let result = self.controller.end();
                if result.is_ok() {
                    self.status = Some("Focus ended".to_string());
                }
                self.absorb(result)
            }
            MenuItem::InstallShortcut => {
                match shortcut::install(&self.runner, &self.shortcut_file) {
                    Ok(()) => self.status = Some(INSTALL_MESSAGE.to_string()),
                    Err(e) => {
                        tracing::warn!(error = %e, "could not install shortcut");
                        self.status = Some(e.to_string());
                    }
                }
                Ok(())
            }
            MenuItem::Quit => {
                self.quit();
                Ok(())
            }
        }
    }

    /// Type a character into the Pomodoro prompt.
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            if c.is_ascii_digit() || c == '-' {
                input.buffer.push(c);
            }
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.buffer.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        if self.input.take().is_some() {
            self.status = Some("Pomodoro cancelled".to_string());
        }
    }

    /// Confirm the current answer; re-ask on invalid input.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures the menu cannot recover from.
    pub fn submit_input(&mut self) -> Result<(), AlfredError> {
        let Some(input) = self.input.as_mut() else {
            return Ok(());
        };

        match parse_positive(&input.buffer) {
            Ok(n) => input.answers.push(n),
            Err(_) => {
                input.buffer.clear();
                self.status = Some("Please enter a whole number greater than 0.".to_string());
                return Ok(());
            }
        }

        input.step += 1;
        if let Some(&next_default) = input.defaults.get(input.step) {
            input.buffer = next_default.to_string();
            return Ok(());
        }

        let answers = input.answers.clone();
        self.input = None;
        let [session, count, brk] = answers[..] else {
            return Ok(());
        };

        let result = self
            .controller
            .configure(session, count, brk)
            .and_then(|()| self.controller.begin());
        if result.is_ok() {
            self.status = Some(format!(
                "Pomodoro: {count} x {session} min, {brk} min breaks"
            ));
        }
        self.absorb(result)
    }

    /// Apply every tick due by `now`.
    ///
    /// A phase change clears the status line so its notice shows.
    pub fn on_tick(&mut self, now: Instant) {
        if matches!(
            self.controller.tick_due(now),
            Some(PomodoroTick::PhaseChanged(_) | PomodoroTick::Finished)
        ) {
            self.status = None;
        }
    }

    /// How long the event loop may block waiting for input.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let max = Duration::from_millis(100);
        self.controller
            .time_until_next_tick(now)
            .map_or(max, |d| d.min(max))
    }

    /// End any running session and leave the loop.
    pub fn quit(&mut self) {
        if self.controller.end().is_ok() {
            tracing::info!("session ended on quit");
        }
        self.should_quit = true;
    }

    /// Turn a recoverable error into a status message.
    fn absorb(&mut self, result: Result<(), AlfredError>) -> Result<(), AlfredError> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => {
                self.status = Some(e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
