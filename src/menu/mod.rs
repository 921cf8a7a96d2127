//! Focus menu.
//!
//! The controllers only talk to [`MenuPresenter`]. Two hosts implement it:
//! [`MenuState`], drawn by the interactive terminal menu, and
//! [`ConsolePresenter`], used by the foreground commands.

mod app;
mod console;
mod event;
pub mod presenter;
mod ui;

pub use app::{App, MenuItem, INSTALL_MESSAGE};
pub use console::ConsolePresenter;
pub use presenter::{MenuPresenter, MenuState};

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::AlfredError;
use crate::system::{CommandRunner, FocusBackend};

/// Run the terminal menu until the user quits.
///
/// Any running session is ended before this returns.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw.
pub fn run<B, R>(app: &mut App<B, R>) -> Result<(), AlfredError>
where
    B: FocusBackend,
    R: CommandRunner,
{
    // Setup terminal
    enable_raw_mode().map_err(|e| AlfredError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| AlfredError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AlfredError::Config(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, app);
    if !app.should_quit {
        app.quit();
    }

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_app<T, B, R>(terminal: &mut Terminal<T>, app: &mut App<B, R>) -> Result<(), AlfredError>
where
    T: Backend,
    B: FocusBackend,
    R: CommandRunner,
{
    while !app.should_quit {
        app.on_tick(Instant::now());

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| AlfredError::Config(format!("Failed to draw: {e}")))?;

        let timeout = app.poll_timeout(Instant::now());
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => app.quit(),
                event::Action::Activate => app.activate_selected()?,
                event::Action::Submit => app.submit_input()?,
            }
        }
    }

    Ok(())
}
