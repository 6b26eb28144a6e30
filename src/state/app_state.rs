//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use super::{SessionStore, StoreEvent, Subscription};

/// Process-wide context shared by the control surface and the countdown task
#[derive(Debug)]
pub struct AppState {
    /// The single writer of session state
    pub store: Arc<SessionStore>,
    /// Store events re-published for async consumers (countdown task)
    pub state_change_tx: broadcast::Sender<StoreEvent>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last operator action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Keeps the store -> channel bridge registered
    _store_subscription: Subscription,
}

impl AppState {
    /// Wrap `store` and start forwarding its events to `state_change_tx`
    pub fn new(store: Arc<SessionStore>, port: u16, host: String) -> Self {
        let (state_change_tx, _) = broadcast::channel(100);

        let tx = state_change_tx.clone();
        let store_subscription = store.subscribe(move |event| {
            if tx.send(event.clone()).is_err() {
                debug!("No receivers for store revision {}", event.revision);
            }
        });

        Self {
            store,
            state_change_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            _store_subscription: store_subscription,
        }
    }

    /// Remember the latest operator action for the status endpoint
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
