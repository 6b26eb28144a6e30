//! Timekeeper - session-based presentation timer
//!
//! An operator configures countdown sessions (timer, colors, messages) and a
//! stage display renders the active one. All state lives in a single
//! [`SessionStore`] with pluggable persistence; a background task ticks the
//! active countdown once per second.

pub mod api;
pub mod config;
pub mod error;
pub mod persistence;
pub mod render;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{PersistenceError, StoreError};
pub use persistence::Persistence;
pub use render::DisplayFrame;
pub use state::{AppState, Session, SessionStore};
pub use utils::signals::shutdown_signal;
