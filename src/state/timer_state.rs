//! Countdown state machine
//!
//! A timer is `Idle/Paused` (not running, time left), `Running`, or `Expired`
//! (not running, `00.00` left). Nothing here owns a clock: the countdown task
//! calls [`TimerState::tick`] once per second while the timer runs.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Countdown length given to freshly created sessions
pub const DEFAULT_DURATION_MINUTES: u32 = 5;

/// At or below this many seconds left the display turns to warning
pub const WARNING_THRESHOLD_SECONDS: u64 = 300;

/// At or below this many seconds left the display turns to danger
pub const DANGER_THRESHOLD_SECONDS: u64 = 60;

/// Countdown state of a single session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    #[serde(alias = "minutes")]
    pub minutes_remaining: u32,
    /// Always in `0..=59`
    #[serde(alias = "seconds")]
    pub seconds_remaining: u32,
    pub is_running: bool,
    /// Configured countdown length; baseline for reset and progress
    pub total_minutes: u32,
}

/// What a single tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off the remaining time
    Advanced,
    /// The timer was at `00.00` and has now stopped
    Expired,
    /// The timer was not running; nothing changed
    Idle,
}

/// How close the countdown is to running out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Warning,
    Danger,
}

impl TimerState {
    /// Create a stopped timer rebased on `total_minutes`
    pub fn with_duration(total_minutes: u32) -> Self {
        Self {
            minutes_remaining: total_minutes,
            seconds_remaining: 0,
            is_running: false,
            total_minutes,
        }
    }

    /// Start counting down. Returns false if the timer was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        true
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Rewind to the configured duration and stop
    pub fn reset(&mut self) {
        *self = Self::with_duration(self.total_minutes);
    }

    /// Change the configured duration. Always stops and rebases the countdown.
    ///
    /// Non-positive durations are rejected and leave the timer untouched.
    pub fn set_duration(&mut self, minutes: i64) -> StoreResult<()> {
        if minutes <= 0 {
            return Err(StoreError::Validation(format!(
                "duration must be a positive number of minutes, got {}",
                minutes
            )));
        }
        let minutes = u32::try_from(minutes).map_err(|_| {
            StoreError::Validation(format!("duration of {} minutes is too large", minutes))
        })?;

        *self = Self::with_duration(minutes);
        Ok(())
    }

    /// Advance the countdown by exactly one second.
    ///
    /// No de-duplication happens here; the scheduler guarantees at most one
    /// tick per second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        if self.minutes_remaining == 0 && self.seconds_remaining == 0 {
            self.is_running = false;
            return TickOutcome::Expired;
        }

        if self.seconds_remaining == 0 {
            self.minutes_remaining -= 1;
            self.seconds_remaining = 59;
        } else {
            self.seconds_remaining -= 1;
        }
        TickOutcome::Advanced
    }

    /// Check the field invariants (seconds in range, positive duration)
    pub fn validate(&self) -> StoreResult<()> {
        if self.seconds_remaining > 59 {
            return Err(StoreError::Validation(format!(
                "seconds remaining must be within 0..=59, got {}",
                self.seconds_remaining
            )));
        }
        if self.total_minutes == 0 {
            return Err(StoreError::Validation(
                "total minutes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn remaining_seconds(&self) -> u64 {
        u64::from(self.minutes_remaining) * 60 + u64::from(self.seconds_remaining)
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.total_minutes) * 60
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.total_seconds().saturating_sub(self.remaining_seconds())
    }

    /// Share of the configured duration already spent, 0.0 ..= 100.0
    pub fn progress_percent(&self) -> f64 {
        let total = self.total_seconds();
        if total == 0 {
            return 0.0;
        }
        (self.elapsed_seconds() as f64 / total as f64) * 100.0
    }

    pub fn is_expired(&self) -> bool {
        !self.is_running && self.remaining_seconds() == 0
    }

    /// Stage clock text, e.g. `05.00`
    pub fn clock_label(&self) -> String {
        format!("{:02}.{:02}", self.minutes_remaining, self.seconds_remaining)
    }

    pub fn urgency(&self) -> Urgency {
        let remaining = self.remaining_seconds();
        if remaining <= DANGER_THRESHOLD_SECONDS {
            Urgency::Danger
        } else if remaining <= WARNING_THRESHOLD_SECONDS {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::with_duration(DEFAULT_DURATION_MINUTES)
    }
}
