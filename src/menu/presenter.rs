//! The rendering side of the menu.
//!
//! Controllers push plain strings and flags through [`MenuPresenter`]; the
//! host decides how to draw them.

/// Receives display updates from a focus controller.
pub trait MenuPresenter {
    /// Enable or disable every duration option.
    fn set_start_enabled(&mut self, enabled: bool);

    /// Enable or disable the "End Focus" option.
    fn set_end_enabled(&mut self, enabled: bool);

    /// Show the remaining-time display with `label`.
    fn show_time_left(&mut self, label: &str);

    /// Hide the remaining-time display.
    fn hide_time_left(&mut self);

    /// Surface a one-line message (phase changes, tool failures).
    fn notify(&mut self, message: &str);
}

/// In-memory menu model.
///
/// The terminal menu draws from it and tests assert on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    pub start_enabled: bool,
    pub end_enabled: bool,
    /// `None` while the display is hidden.
    pub time_left: Option<String>,
    pub message: Option<String>,
}

impl MenuState {
    /// A menu with nothing running: options enabled, end disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start_enabled: true,
            end_enabled: false,
            time_left: None,
            message: None,
        }
    }

    /// Title of the remaining-time item.
    #[must_use]
    pub fn time_left_title(&self) -> Option<String> {
        self.time_left
            .as_ref()
            .map(|label| format!("Time Left: {label}"))
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuPresenter for MenuState {
    fn set_start_enabled(&mut self, enabled: bool) {
        self.start_enabled = enabled;
    }

    fn set_end_enabled(&mut self, enabled: bool) {
        self.end_enabled = enabled;
    }

    fn show_time_left(&mut self, label: &str) {
        self.time_left = Some(label.to_string());
    }

    fn hide_time_left(&mut self) {
        self.time_left = None;
    }

    fn notify(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}
