//! Session entity and its partial updates

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::TimerState;
use crate::error::{StoreError, StoreResult};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#21212b";
pub const DEFAULT_TEXT_COLOR: &str = "#f5f5f5";
pub const DEFAULT_SHORT_MESSAGE: &str = "Teks Peringatan Untuk Pembicara";
pub const DEFAULT_LONG_MESSAGE: &str =
    "Teks pesan untuk pembicara dan juga host dari operator seminar";

/// Which visual the stage display shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Timer,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub background_color: String,
    pub text_color: String,
    pub mode: DisplayMode,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            mode: DisplayMode::Timer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    /// Shown under the clock in timer mode
    pub short_message: String,
    /// Shown full screen in message mode
    pub long_message: String,
}

impl Default for MessageData {
    fn default() -> Self {
        Self {
            short_message: DEFAULT_SHORT_MESSAGE.to_string(),
            long_message: DEFAULT_LONG_MESSAGE.to_string(),
        }
    }
}

/// A named timer + display + message bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub timer: TimerState,
    pub display: DisplaySettings,
    pub messages: MessageData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Build a session with default timer, colors and placeholder messages
    pub fn new(id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            timer: TimerState::default(),
            display: DisplaySettings::default(),
            messages: MessageData::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`, keeping it strictly increasing even when the
    /// clock has not moved since the previous mutation
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }
}

/// Partial update of a [`TimerState`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerPatch {
    #[serde(default, alias = "minutes", skip_serializing_if = "Option::is_none")]
    pub minutes_remaining: Option<u32>,
    #[serde(default, alias = "seconds", skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<u32>,
}

impl TimerPatch {
    /// Shallow-merge into `timer`. The merged result must satisfy the timer
    /// invariants, otherwise `timer` is left as it was.
    pub fn apply_to(&self, timer: &mut TimerState) -> StoreResult<()> {
        let mut merged = timer.clone();
        if let Some(minutes) = self.minutes_remaining {
            merged.minutes_remaining = minutes;
        }
        if let Some(seconds) = self.seconds_remaining {
            merged.seconds_remaining = seconds;
        }
        if let Some(running) = self.is_running {
            merged.is_running = running;
        }
        if let Some(total) = self.total_minutes {
            merged.total_minutes = total;
        }
        merged.validate()?;
        *timer = merged;
        Ok(())
    }
}

/// Partial update of [`DisplaySettings`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<DisplayMode>,
}

impl DisplayPatch {
    pub fn apply_to(&self, display: &mut DisplaySettings) {
        if let Some(color) = &self.background_color {
            display.background_color = color.clone();
        }
        if let Some(color) = &self.text_color {
            display.text_color = color.clone();
        }
        if let Some(mode) = self.mode {
            display.mode = mode;
        }
    }
}

/// Partial update of [`MessageData`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_message: Option<String>,
}

impl MessagesPatch {
    pub fn apply_to(&self, messages: &mut MessageData) {
        if let Some(text) = &self.short_message {
            messages.short_message = text.clone();
        }
        if let Some(text) = &self.long_message {
            messages.long_message = text.clone();
        }
    }
}

/// Update of any mutable part of a session. `id` and `created_at` are never
/// part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<MessagesPatch>,
}

impl SessionPatch {
    pub fn timer(patch: TimerPatch) -> Self {
        Self { timer: Some(patch), ..Self::default() }
    }

    pub fn display(patch: DisplayPatch) -> Self {
        Self { display: Some(patch), ..Self::default() }
    }

    pub fn messages(patch: MessagesPatch) -> Self {
        Self { messages: Some(patch), ..Self::default() }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    /// Apply every part of the patch to a copy of `session` and return it,
    /// stamped with a fresh `updated_at`. Any invalid part rejects the whole patch.
    pub fn merged(&self, session: &Session) -> StoreResult<Session> {
        let mut next = session.clone();
        if let Some(name) = &self.name {
            next.name = normalize_name(name)?;
        }
        if let Some(timer) = &self.timer {
            timer.apply_to(&mut next.timer)?;
        }
        if let Some(display) = &self.display {
            display.apply_to(&mut next.display);
        }
        if let Some(messages) = &self.messages {
            messages.apply_to(&mut next.messages);
        }
        next.touch();
        Ok(next)
    }
}

/// Trim a session name, rejecting names that are empty afterwards
pub fn normalize_name(name: &str) -> StoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(
            "session name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
