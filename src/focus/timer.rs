//! The one-second tick source and duration formatting.

use std::time::{Duration, Instant};

/// A repeating tick source.
///
/// The timer does not sleep or spawn anything. The event loop that owns
/// it asks how many ticks are due with [`CountdownTimer::poll`] and how long
/// it may wait with [`CountdownTimer::time_until_next`].
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl CountdownTimer {
    /// Create a disarmed timer with the given period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// A disarmed one-second timer.
    #[must_use]
    pub const fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Start producing ticks, the first one a full period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Stop producing ticks.
    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks that became due up to `now`.
    ///
    /// A loop that was blocked (for example by a slow external command)
    /// gets every missed tick back, so session time tracks the wall clock.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };

        let mut ticks = 0;
        while due <= now {
            ticks += 1;
            due += self.period;
        }
        self.next_due = Some(due);
        ticks
    }

    /// How long until the next tick, or `None` when disarmed.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::every_second()
    }
}

/// Format whole minutes as a human-readable string.
#[must_use]
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
