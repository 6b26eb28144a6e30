//! Persistence module
//!
//! Durable storage of the session collection and the active session pointer
//! on top of a plain key-value store.

pub mod adapter;
pub mod kv;

pub use adapter::{Persistence, PersistedState, ACTIVE_SESSION_KEY, SESSIONS_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
