//! Stage display frames
//!
//! A frame is everything a renderer needs to paint one screen. It is a pure
//! function of a session's `timer`, `display` and `messages`; the lack of an
//! active session is its own frame rather than an absent value.

use serde::Serialize;

use crate::state::{DisplayMode, DisplaySettings, MessageData, Session, TimerState, Urgency};

/// The clock part of a timer-mode frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockFace {
    /// `MM.SS`
    pub label: String,
    pub minutes: u32,
    pub seconds: u32,
    pub is_running: bool,
    pub urgency: Urgency,
    pub progress_percent: f64,
}

impl From<&TimerState> for ClockFace {
    fn from(timer: &TimerState) -> Self {
        Self {
            label: timer.clock_label(),
            minutes: timer.minutes_remaining,
            seconds: timer.seconds_remaining,
            is_running: timer.is_running,
            urgency: timer.urgency(),
            progress_percent: timer.progress_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum DisplayFrame {
    /// Nothing selected; the display asks the operator to pick a session
    NoSession,
    /// Countdown with the short message above it
    #[serde(rename_all = "camelCase")]
    Timer {
        background_color: String,
        text_color: String,
        clock: ClockFace,
        short_message: String,
    },
    /// Full-screen long message
    #[serde(rename_all = "camelCase")]
    Message {
        background_color: String,
        text_color: String,
        long_message: String,
    },
}

impl DisplayFrame {
    pub fn render(timer: &TimerState, display: &DisplaySettings, messages: &MessageData) -> Self {
        match display.mode {
            DisplayMode::Timer => Self::Timer {
                background_color: display.background_color.clone(),
                text_color: display.text_color.clone(),
                clock: ClockFace::from(timer),
                short_message: messages.short_message.clone(),
            },
            DisplayMode::Message => Self::Message {
                background_color: display.background_color.clone(),
                text_color: display.text_color.clone(),
                long_message: messages.long_message.clone(),
            },
        }
    }

    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            Some(s) => Self::render(&s.timer, &s.display, &s.messages),
            None => Self::NoSession,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_session_frame() {
        let frame = DisplayFrame::for_session(None);
        assert_eq!(frame, DisplayFrame::NoSession);
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["view"], "noSession");
    }

    #[test]
    fn test_timer_frame() {
        let session = Session::new("1".into(), "Talk".into());
        let frame = DisplayFrame::for_session(Some(&session));

        let DisplayFrame::Timer { clock, short_message, background_color, .. } = frame else {
            panic!("expected a timer frame");
        };
        assert_eq!(clock.label, "05.00");
        assert_eq!(clock.urgency, Urgency::Warning);
        assert!(!clock.is_running);
        assert_eq!(short_message, session.messages.short_message);
        assert_eq!(background_color, "#21212b");
    }

    #[test]
    fn test_message_frame() {
        let mut session = Session::new("1".into(), "Talk".into());
        session.display.mode = DisplayMode::Message;
        session.messages.long_message = "Please wrap up".into();

        let frame = DisplayFrame::for_session(Some(&session));
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["view"], "message");
        assert_eq!(json["longMessage"], "Please wrap up");
        assert_eq!(json["textColor"], "#f5f5f5");
        assert!(json.get("clock").is_none());
    }
}
