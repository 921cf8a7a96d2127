//! Presenter for the foreground commands: prints to a terminal stream.

use std::io::Write;

use colored::Colorize;

use super::presenter::MenuPresenter;

/// Prints the remaining time whenever it changes, plus notifications.
///
/// Enable flags have no console form and are ignored.
pub struct ConsolePresenter<W: Write> {
    out: W,
    last_label: Option<String>,
}

impl<W: Write> ConsolePresenter<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            last_label: None,
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // A closed stdout must not abort a running session.
        writeln!(self.out, "{text}").ok();
        self.out.flush().ok();
    }
}

impl<W: Write> MenuPresenter for ConsolePresenter<W> {
    fn set_start_enabled(&mut self, _enabled: bool) {}

    fn set_end_enabled(&mut self, _enabled: bool) {}

    fn show_time_left(&mut self, label: &str) {
        if self.last_label.as_deref() == Some(label) {
            return;
        }
        self.last_label = Some(label.to_string());
        let text = format!("{} {}", "Time Left:".cyan().bold(), label);
        self.line(&text);
    }

    fn hide_time_left(&mut self) {
        if self.last_label.take().is_some() {
            let text = "Focus ended".dimmed().to_string();
            self.line(&text);
        }
    }

    fn notify(&mut self, message: &str) {
        let text = message.yellow().to_string();
        self.line(&text);
    }
}
