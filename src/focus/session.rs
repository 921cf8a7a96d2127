//! A single focus session and its display label.

use serde::{Deserialize, Serialize};

use crate::error::AlfredError;

/// Whether Do Not Disturb is currently requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FocusState {
    On,
    #[default]
    Off,
}

impl std::fmt::Display for FocusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// The elapsed/target pair of an active focus session.
///
/// `elapsed_seconds` never exceeds `duration_seconds`; the session is
/// expired when they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    duration_seconds: u32,
    elapsed_seconds: u32,
}

impl Session {
    /// Create a session of `minutes` whole minutes.
    ///
    /// # Errors
    ///
    /// Returns `AlfredError::InvalidDuration` for zero minutes or a length
    /// that does not fit in seconds.
    pub fn from_minutes(minutes: u32) -> Result<Self, AlfredError> {
        if minutes == 0 {
            return Err(AlfredError::InvalidDuration(
                "focus length must be at least 1 minute".to_string(),
            ));
        }
        let duration_seconds = minutes.checked_mul(60).ok_or_else(|| {
            AlfredError::InvalidDuration(format!("{minutes} minutes is too long"))
        })?;

        Ok(Self {
            duration_seconds,
            elapsed_seconds: 0,
        })
    }

    /// Advance by one second. Returns true if the session just expired.
    pub fn advance(&mut self) -> bool {
        if self.elapsed_seconds < self.duration_seconds {
            self.elapsed_seconds += 1;
        }
        self.is_expired()
    }

    #[cfg(test)]
    pub(crate) const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    #[cfg(test)]
    pub(crate) const fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.duration_seconds - self.elapsed_seconds
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.elapsed_seconds == self.duration_seconds
    }

    /// Progress as a fraction (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed_seconds) / f64::from(self.duration_seconds)
    }

    /// The time-left label for this session.
    #[must_use]
    pub fn label(&self) -> String {
        time_left_label(self.remaining_seconds())
    }
}

/// Render remaining seconds for the menu.
///
/// Whole minutes are floored and anything under a minute reads `< 1 min`,
/// so the label never shows `0 min`.
#[must_use]
pub fn time_left_label(remaining_seconds: u32) -> String {
    if remaining_seconds < 60 {
        "< 1 min".to_string()
    } else {
        format!("{} min", remaining_seconds / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minutes() {
        let session = Session::from_minutes(25).unwrap();
        assert_eq!(session.remaining_seconds(), 1500);
        assert!(session.progress().abs() < f64::EPSILON);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_zero_minutes_rejected() {
        assert!(matches!(
            Session::from_minutes(0),
            Err(AlfredError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(Session::from_minutes(u32::MAX).is_err());
    }

    #[test]
    fn test_advance_to_expiry() {
        let mut session = Session::from_minutes(1).unwrap();
        for _ in 0..59 {
            assert!(!session.advance());
        }
        assert!(session.advance());
        assert_eq!(session.remaining_seconds(), 0);

        // Elapsed never passes the duration.
        assert!(session.advance());
        assert_eq!(session.remaining_seconds(), 0);
    }

    #[test]
    fn test_label_floors_minutes() {
        assert_eq!(time_left_label(1500), "25 min");
        assert_eq!(time_left_label(1499), "24 min");
        assert_eq!(time_left_label(119), "1 min");
        assert_eq!(time_left_label(60), "1 min");
    }

    #[test]
    fn test_label_under_a_minute() {
        for secs in 1..60 {
            assert_eq!(time_left_label(secs), "< 1 min");
        }
    }

    #[test]
    fn test_progress() {
        let mut session = Session::from_minutes(1).unwrap();
        for _ in 0..30 {
            session.advance();
        }
        assert!((session.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_focus_state_display() {
        assert_eq!(FocusState::On.to_string(), "on");
        assert_eq!(FocusState::default(), FocusState::Off);
    }
}
