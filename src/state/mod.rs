//! State management module
//!
//! Timer state machine, the session entity and the store that owns all sessions.

pub mod app_state;
pub mod session;
pub mod store;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use session::{
    DisplayMode, DisplayPatch, DisplaySettings, MessageData, MessagesPatch, Session,
    SessionPatch, TimerPatch,
};
pub use store::{SessionStore, StoreChange, StoreEvent, StoreSnapshot, Subscription};
pub use timer_state::{TickOutcome, TimerState, Urgency};
