//! Event handling for the terminal menu.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::error::AlfredError;
use crate::menu::app::App;
use crate::system::{CommandRunner, FocusBackend};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Run the selected menu item.
    Activate,
    /// Confirm the current Pomodoro answer.
    Submit,
}

/// Wait up to `timeout` for a key and map it to an action.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<B, R>(
    app: &mut App<B, R>,
    timeout: Duration,
) -> Result<Option<Action>, AlfredError>
where
    B: FocusBackend,
    R: CommandRunner,
{
    if event::poll(timeout).map_err(|e| AlfredError::Config(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| AlfredError::Config(format!("Event read failed: {e}")))?
        {
            return Ok(handle_key(app, key));
        }
    }

    Ok(None)
}

/// Map a single key press.
pub fn handle_key<B, R>(app: &mut App<B, R>, key: KeyEvent) -> Option<Action>
where
    B: FocusBackend,
    R: CommandRunner,
{
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.input.is_some() {
        match key.code {
            KeyCode::Enter => return Some(Action::Submit),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Enter | KeyCode::Char(' ') => return Some(Action::Activate),
        KeyCode::Char('?') => {
            app.status = Some("j/k:nav | Enter:select | q:quit (ends focus)".to_string());
        }
        _ => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::system::command::MockCommandRunner;
    use crate::system::MockFocusBackend;

    fn app() -> App<MockFocusBackend, MockCommandRunner> {
        let mut backend = MockFocusBackend::new();
        backend.expect_set_dnd().returning(|_, _| Ok(()));
        backend.expect_toggle_dock().returning(|| Ok(()));
        App::new(backend, MockCommandRunner::new(), &Config::default(), true)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('j'))), None);
        assert_eq!(handle_key(&mut app, key(KeyCode::Down)), None);
        assert_eq!(app.selected, 2);
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_input_mode_captures_keys() {
        let mut app = app();
        app.selected = app
            .items
            .iter()
            .position(|&i| i == crate::menu::MenuItem::Pomodoro)
            .unwrap();
        app.activate_selected().unwrap();

        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), None);
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), Some(Action::Submit));
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.input.is_none());
    }
}
