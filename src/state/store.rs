//! Session store
//!
//! Owns the ordered session collection and the active session pointer. Every
//! mutation goes through this type: it validates, applies the change under one
//! lock, writes the result through the persistence adapter and then notifies
//! subscribers. Mutations are serialized end to end, so subscribers see events
//! in revision order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::{
    session::normalize_name, DisplayPatch, MessagesPatch, Session, SessionPatch, TickOutcome,
    TimerPatch, TimerState,
};
use crate::{
    error::{StoreError, StoreResult},
    persistence::{MemoryStore, Persistence},
};

/// What a store mutation changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Created(String),
    Deleted(String),
    Selected(Option<String>),
    Updated(String),
    Ticked { id: String, outcome: TickOutcome },
}

/// Delivered to subscribers after every completed mutation
#[derive(Debug, Clone)]
pub struct StoreEvent {
    /// Strictly increasing across the lifetime of the store
    pub revision: u64,
    pub change: StoreChange,
    /// Active session as it stands after the mutation
    pub active: Option<Session>,
}

/// Read model handed to the control surface
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub sessions: Vec<Session>,
    pub active_session_id: Option<String>,
}

pub type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Registration handle returned by [`SessionStore::subscribe`].
///
/// The listener stays registered for as long as the handle lives.
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[derive(Debug, Default)]
struct Inner {
    sessions: Vec<Session>,
    active_id: Option<String>,
    revision: u64,
}

impl Inner {
    fn position(&self, id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == id)
    }

    fn active(&self) -> Option<&Session> {
        let id = self.active_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Millisecond timestamp, bumped past any id already in use
    fn next_session_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.position(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

/// Which persisted keys a mutation touched
#[derive(Debug, Clone, Copy)]
struct Writes {
    sessions: bool,
    active: bool,
}

impl Writes {
    const SESSIONS: Self = Self { sessions: true, active: false };
    const ACTIVE: Self = Self { sessions: false, active: true };
    const BOTH: Self = Self { sessions: true, active: true };
}

enum Target<'a> {
    Id(&'a str),
    Active,
}

/// The single writer of session state
pub struct SessionStore {
    inner: Mutex<Inner>,
    /// Held by a mutation from before it takes `inner` until its listeners
    /// have returned
    writer: Mutex<()>,
    persistence: Persistence,
    listeners: Arc<Mutex<ListenerRegistry>>,
}

impl SessionStore {
    /// Create a store seeded from whatever the adapter can restore
    pub fn open(persistence: Persistence) -> Self {
        let restored = persistence.load();
        info!(
            "Session store opened with {} sessions (active: {:?})",
            restored.sessions.len(),
            restored.active_id
        );

        Self {
            inner: Mutex::new(Inner {
                sessions: restored.sessions,
                active_id: restored.active_id,
                revision: 0,
            }),
            writer: Mutex::new(()),
            persistence,
            listeners: Arc::new(Mutex::new(ListenerRegistry::default())),
        }
    }

    /// Store backed by process memory only
    pub fn ephemeral() -> Self {
        Self::open(Persistence::new(Arc::new(MemoryStore::new())))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn sessions(&self) -> Vec<Session> {
        self.lock().sessions.clone()
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.lock().active_id.clone()
    }

    /// The active session, or `None` when nothing is selected or the pointer
    /// no longer resolves
    pub fn active_session(&self) -> Option<Session> {
        self.lock().active().cloned()
    }

    pub fn session(&self, id: &str) -> Option<Session> {
        let inner = self.lock();
        inner.position(id).map(|index| inner.sessions[index].clone())
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let inner = self.lock();
        StoreSnapshot {
            sessions: inner.sessions.clone(),
            active_session_id: inner.active_id.clone(),
        }
    }

    // ── Collection ───────────────────────────────────────────────────

    /// Create a session with default settings and make it active
    pub fn create_session(&self, name: &str) -> StoreResult<String> {
        let name = normalize_name(name).inspect_err(|e| {
            warn!("Rejected session creation: {}", e);
        })?;

        let _writer = self.write_lock();
        let (id, event) = {
            let mut inner = self.lock();
            let id = inner.next_session_id();
            inner.sessions.push(Session::new(id.clone(), name.clone()));
            inner.active_id = Some(id.clone());
            let event = self.finish(&mut inner, StoreChange::Created(id.clone()), Writes::BOTH);
            (id, event)
        };

        info!("Created session '{}' ({})", name, id);
        self.notify(&event);
        Ok(id)
    }

    /// Remove a session. Unknown ids are ignored. Deleting the active session
    /// clears the pointer without picking another one.
    pub fn delete_session(&self, id: &str) -> bool {
        let _writer = self.write_lock();
        let event = {
            let mut inner = self.lock();
            let Some(index) = inner.position(id) else {
                debug!("Delete ignored, session '{}' not found", id);
                return false;
            };
            inner.sessions.remove(index);

            let was_active = inner.active_id.as_deref() == Some(id);
            if was_active {
                inner.active_id = None;
            }
            let writes = if was_active { Writes::BOTH } else { Writes::SESSIONS };
            self.finish(&mut inner, StoreChange::Deleted(id.to_string()), writes)
        };

        info!("Deleted session {}", id);
        self.notify(&event);
        true
    }

    /// Point the active session at `id`. Unknown ids are rejected.
    pub fn select_session(&self, id: &str) -> StoreResult<()> {
        let _writer = self.write_lock();
        let event = {
            let mut inner = self.lock();
            if inner.position(id).is_none() {
                warn!("Cannot select session '{}': not found", id);
                return Err(StoreError::NotFound(id.to_string()));
            }
            inner.active_id = Some(id.to_string());
            self.finish(
                &mut inner,
                StoreChange::Selected(Some(id.to_string())),
                Writes::ACTIVE,
            )
        };

        info!("Selected session {}", id);
        self.notify(&event);
        Ok(())
    }

    // ── Field updates ────────────────────────────────────────────────

    /// Merge `patch` into the session with `id`.
    ///
    /// Returns `Ok(None)` when no such session exists.
    pub fn update_session(&self, id: &str, patch: &SessionPatch) -> StoreResult<Option<Session>> {
        self.replace(Target::Id(id), |session| patch.merged(session).map(Some))
    }

    pub fn rename_session(&self, id: &str, name: &str) -> StoreResult<Option<Session>> {
        self.update_session(id, &SessionPatch::rename(name))
    }

    /// Merge `patch` into the active session; `Ok(None)` when there is none
    pub fn update_active(&self, patch: &SessionPatch) -> StoreResult<Option<Session>> {
        self.replace(Target::Active, |session| patch.merged(session).map(Some))
    }

    pub fn update_timer(&self, patch: TimerPatch) -> StoreResult<Option<Session>> {
        self.update_active(&SessionPatch::timer(patch))
    }

    pub fn update_display(&self, patch: DisplayPatch) -> StoreResult<Option<Session>> {
        self.update_active(&SessionPatch::display(patch))
    }

    pub fn update_messages(&self, patch: MessagesPatch) -> StoreResult<Option<Session>> {
        self.update_active(&SessionPatch::messages(patch))
    }

    // ── Timer controls on the active session ─────────────────────────

    pub fn start_timer(&self) -> Option<Session> {
        self.edit_active_timer(|timer| Ok(timer.start())).ok().flatten()
    }

    pub fn pause_timer(&self) -> Option<Session> {
        self.edit_active_timer(|timer| {
            let was_running = timer.is_running;
            timer.pause();
            Ok(was_running)
        })
        .ok()
        .flatten()
    }

    pub fn reset_timer(&self) -> Option<Session> {
        self.edit_active_timer(|timer| {
            let before = timer.clone();
            timer.reset();
            Ok(*timer != before)
        })
        .ok()
        .flatten()
    }

    pub fn set_duration(&self, minutes: i64) -> StoreResult<Option<Session>> {
        self.edit_active_timer(|timer| timer.set_duration(minutes).map(|()| true))
    }

    /// Advance the session `id` by one second if it is the active, running
    /// session. Returns `None` when the tick does not apply to it.
    pub fn tick(&self, id: &str) -> Option<TickOutcome> {
        let _writer = self.write_lock();
        let (outcome, event) = {
            let mut inner = self.lock();
            if inner.active_id.as_deref() != Some(id) {
                return None;
            }
            let index = inner.position(id)?;
            let session = &mut inner.sessions[index];
            let outcome = session.timer.tick();
            if outcome == TickOutcome::Idle {
                return None;
            }
            session.touch();

            let change = StoreChange::Ticked { id: id.to_string(), outcome };
            (outcome, self.finish(&mut inner, change, Writes::SESSIONS))
        };

        if outcome == TickOutcome::Expired {
            info!("Countdown of session {} expired", id);
        }
        self.notify(&event);
        Some(outcome)
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register `listener` for every completed mutation.
    ///
    /// Listeners run on the mutating thread after the store lock is released,
    /// so they may read from the store. Delivery is serialized across threads
    /// and follows revision order. A listener must not mutate the store; it
    /// would block on its own pending delivery.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let mut registry = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Arc::new(listener)));
        debug!("Registered store listener {}", id);

        Subscription {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn edit_active_timer<F>(&self, edit: F) -> StoreResult<Option<Session>>
    where
        F: FnOnce(&mut TimerState) -> StoreResult<bool>,
    {
        self.replace(Target::Active, |session| {
            let mut next = session.clone();
            if !edit(&mut next.timer)? {
                return Ok(None);
            }
            next.touch();
            Ok(Some(next))
        })
    }

    /// Replace one session with the result of `f`. `f` returns `None` when
    /// nothing changed, in which case nothing is written or announced.
    fn replace<F>(&self, target: Target<'_>, f: F) -> StoreResult<Option<Session>>
    where
        F: FnOnce(&Session) -> StoreResult<Option<Session>>,
    {
        let _writer = self.write_lock();
        let (updated, event) = {
            let mut inner = self.lock();
            let id = match target {
                Target::Id(id) => id.to_string(),
                Target::Active => match &inner.active_id {
                    Some(id) => id.clone(),
                    None => {
                        debug!("Update ignored, no active session");
                        return Ok(None);
                    }
                },
            };
            let Some(index) = inner.position(&id) else {
                debug!("Update ignored, session '{}' not found", id);
                return Ok(None);
            };

            let next = f(&inner.sessions[index]).inspect_err(|e| {
                warn!("Rejected update of session {}: {}", id, e);
            })?;
            let Some(next) = next else {
                return Ok(Some(inner.sessions[index].clone()));
            };

            inner.sessions[index] = next.clone();
            (next, self.finish(&mut inner, StoreChange::Updated(id), Writes::SESSIONS))
        };

        self.notify(&event);
        Ok(Some(updated))
    }

    /// Persist the touched keys and build the event for this mutation.
    /// Called with the store lock held.
    fn finish(&self, inner: &mut Inner, change: StoreChange, writes: Writes) -> StoreEvent {
        if writes.sessions {
            if let Err(e) = self.persistence.save(&inner.sessions) {
                error!("Failed to persist sessions: {}", e);
            }
        }
        if writes.active {
            if let Err(e) = self.persistence.save_active_id(inner.active_id.as_deref()) {
                error!("Failed to persist active session id: {}", e);
            }
        }

        inner.revision += 1;
        StoreEvent {
            revision: inner.revision,
            change,
            active: inner.active().cloned(),
        }
    }

    fn notify(&self, event: &StoreEvent) {
        let listeners: Vec<Listener> = {
            let registry = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            registry.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        debug!(
            "Store revision {} ({:?}) -> {} listeners",
            event.revision,
            event.change,
            listeners.len()
        );
        for listener in listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("sessions", &inner.sessions.len())
            .field("active_id", &inner.active_id)
            .field("revision", &inner.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        persistence::{KeyValueStore, ACTIVE_SESSION_KEY},
        state::DisplayMode,
    };

    fn store_with_kv() -> (SessionStore, Arc<MemoryStore>) {
        let kv = Arc::new(MemoryStore::new());
        let store = SessionStore::open(Persistence::new(kv.clone()));
        (store, kv)
    }

    fn record_events(store: &SessionStore) -> (Subscription, Arc<Mutex<Vec<StoreEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let subscription = store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (subscription, events)
    }

    #[test]
    fn test_create_session_becomes_active_with_defaults() {
        let store = SessionStore::ephemeral();
        let id = store.create_session("  Talk 1 ").unwrap();

        assert_eq!(store.active_session_id(), Some(id.clone()));
        let session = store.active_session().unwrap();
        assert_eq!(session.name, "Talk 1");
        assert_eq!(session.timer, TimerState::with_duration(5));
        assert_eq!(session.display.mode, DisplayMode::Timer);
    }

    #[test]
    fn test_create_session_rejects_blank_name() {
        let store = SessionStore::ephemeral();
        let (_subscription, events) = record_events(&store);

        assert!(matches!(store.create_session("   "), Err(StoreError::Validation(_))));
        assert!(store.sessions().is_empty());
        assert_eq!(store.active_session_id(), None);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_session_ids_are_unique_and_ordered() {
        let store = SessionStore::ephemeral();
        let ids: Vec<String> = (0..20)
            .map(|i| store.create_session(&format!("Talk {}", i)).unwrap())
            .collect();

        let names: Vec<String> = store.sessions().into_iter().map(|s| s.name).collect();
        assert_eq!(names[0], "Talk 0");
        assert_eq!(names[19], "Talk 19");

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(store.active_session_id(), ids.last().cloned());
    }

    #[test]
    fn test_delete_active_clears_pointer() {
        let (store, kv) = store_with_kv();
        let id = store.create_session("A").unwrap();
        assert!(kv.get(ACTIVE_SESSION_KEY).unwrap().is_some());

        assert!(store.delete_session(&id));
        assert_eq!(store.active_session_id(), None);
        assert!(store.active_session().is_none());
        assert_eq!(kv.get(ACTIVE_SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_delete_other_session_keeps_pointer() {
        let store = SessionStore::ephemeral();
        let first = store.create_session("A").unwrap();
        let second = store.create_session("B").unwrap();

        assert!(store.delete_session(&first));
        assert_eq!(store.active_session_id(), Some(second));
        assert!(!store.delete_session(&first));
    }

    #[test]
    fn test_select_unknown_session_is_rejected() {
        let store = SessionStore::ephemeral();
        let id = store.create_session("A").unwrap();

        assert_eq!(
            store.select_session("nope"),
            Err(StoreError::NotFound("nope".to_string()))
        );
        assert_eq!(store.active_session_id(), Some(id));
    }

    #[test]
    fn test_select_switches_active() {
        let store = SessionStore::ephemeral();
        let first = store.create_session("A").unwrap();
        store.create_session("B").unwrap();

        store.select_session(&first).unwrap();
        assert_eq!(store.active_session().unwrap().name, "A");
    }

    #[test]
    fn test_update_display_merges_and_stamps() {
        let store = SessionStore::ephemeral();
        store.create_session("A").unwrap();
        store
            .update_display(DisplayPatch {
                background_color: Some("#000".to_string()),
                text_color: Some("#000".to_string()),
                mode: Some(DisplayMode::Timer),
            })
            .unwrap();
        let before = store.active_session().unwrap();

        let after = store
            .update_display(DisplayPatch {
                text_color: Some("#fff".to_string()),
                ..DisplayPatch::default()
            })
            .unwrap()
            .unwrap();

        assert_eq!(after.display.background_color, "#000");
        assert_eq!(after.display.text_color, "#fff");
        assert_eq!(after.display.mode, DisplayMode::Timer);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(store.active_session().unwrap(), after);
    }

    #[test]
    fn test_updates_without_target_are_silent() {
        let store = SessionStore::ephemeral();
        assert_eq!(store.update_messages(MessagesPatch::default()).unwrap(), None);
        assert_eq!(store.start_timer(), None);

        store.create_session("A").unwrap();
        assert_eq!(
            store.update_session("missing", &SessionPatch::rename("B")).unwrap(),
            None
        );
    }

    #[test]
    fn test_invalid_timer_patch_leaves_state_untouched() {
        let store = SessionStore::ephemeral();
        store.create_session("A").unwrap();
        let before = store.active_session().unwrap();

        let result = store.update_timer(TimerPatch {
            total_minutes: Some(0),
            ..TimerPatch::default()
        });
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.active_session().unwrap(), before);
    }

    #[test]
    fn test_set_duration_through_store() {
        let store = SessionStore::ephemeral();
        store.create_session("A").unwrap();
        store.start_timer();

        assert!(store.set_duration(0).is_err());
        assert!(store.set_duration(-3).is_err());
        assert!(store.active_session().unwrap().timer.is_running);

        let session = store.set_duration(10).unwrap().unwrap();
        assert_eq!(session.timer, TimerState::with_duration(10));
    }

    #[test]
    fn test_tick_only_applies_to_active_running_session() {
        let store = SessionStore::ephemeral();
        let first = store.create_session("A").unwrap();
        let second = store.create_session("B").unwrap();

        assert_eq!(store.tick(&second), None);
        store.start_timer();
        assert_eq!(store.tick(&first), None);
        assert_eq!(store.tick(&second), Some(TickOutcome::Advanced));
        assert_eq!(store.session(&second).unwrap().timer.remaining_seconds(), 299);

        store.pause_timer();
        assert_eq!(store.tick(&second), None);
    }

    #[test]
    fn test_listeners_see_every_mutation_in_order() {
        let store = SessionStore::ephemeral();
        let (subscription, events) = record_events(&store);

        let id = store.create_session("A").unwrap();
        store.start_timer();
        store.tick(&id);
        store.delete_session(&id);

        {
            let events = events.lock().unwrap();
            let changes: Vec<&StoreChange> = events.iter().map(|e| &e.change).collect();
            assert_eq!(
                changes,
                vec![
                    &StoreChange::Created(id.clone()),
                    &StoreChange::Updated(id.clone()),
                    &StoreChange::Ticked { id: id.clone(), outcome: TickOutcome::Advanced },
                    &StoreChange::Deleted(id.clone()),
                ]
            );
            assert!(events.windows(2).all(|w| w[0].revision < w[1].revision));
            assert_eq!(events[2].active.as_ref().unwrap().timer.seconds_remaining, 59);
            assert!(events[3].active.is_none());
        }

        subscription.unsubscribe();
        store.create_session("B").unwrap();
        assert_eq!(events.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_update_timer_merges_single_field() {
        let (store, _) = store_with_kv();
        store.create_session("A").unwrap();
        let before = store.active_session().unwrap();

        let session = store
            .update_timer(TimerPatch {
                seconds_remaining: Some(30),
                ..TimerPatch::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(
            session.timer,
            TimerState {
                minutes_remaining: 5,
                seconds_remaining: 30,
                is_running: false,
                total_minutes: 5,
            }
        );
        assert!(session.updated_at > before.updated_at);
        assert_eq!(store.active_session().unwrap().timer, session.timer);
    }

    #[test]
    fn test_reset_timer_rewinds_running_session() {
        let store = SessionStore::ephemeral();
        let id = store.create_session("A").unwrap();
        store.start_timer();
        for _ in 0..3 {
            store.tick(&id);
        }
        let before = store.active_session().unwrap();
        assert_eq!(before.timer.remaining_seconds(), 297);

        let session = store.reset_timer().unwrap();
        assert_eq!(
            session.timer,
            TimerState {
                minutes_remaining: 5,
                seconds_remaining: 0,
                is_running: false,
                total_minutes: 5,
            }
        );
        assert!(session.updated_at > before.updated_at);
        assert_eq!(store.tick(&id), None);
    }

    #[test]
    fn test_reset_of_fresh_timer_is_not_announced() {
        let store = SessionStore::ephemeral();
        store.create_session("A").unwrap();
        let before = store.active_session().unwrap();
        let (_subscription, events) = record_events(&store);

        let session = store.reset_timer().unwrap();
        assert_eq!(session, before);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_timer_controls_without_active_session() {
        let store = SessionStore::ephemeral();
        let (_subscription, events) = record_events(&store);

        assert!(store.start_timer().is_none());
        assert!(store.pause_timer().is_none());
        assert!(store.reset_timer().is_none());
        assert_eq!(store.set_duration(3), Ok(None));
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_mutations_deliver_in_revision_order() {
        let store = Arc::new(SessionStore::ephemeral());
        let id = store.create_session("A").unwrap();
        store.start_timer();
        let (_subscription, events) = record_events(&store);

        let ticker = {
            let store = Arc::clone(&store);
            let id = id.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    store.tick(&id);
                }
            })
        };
        for i in 0..50 {
            store
                .update_messages(MessagesPatch {
                    short_message: Some(format!("Note {}", i)),
                    ..MessagesPatch::default()
                })
                .unwrap();
        }
        ticker.join().unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 100);
        assert!(events.windows(2).all(|w| w[0].revision + 1 == w[1].revision));
    }

    #[test]
    fn test_noop_start_is_not_announced() {
        let store = SessionStore::ephemeral();
        store.create_session("A").unwrap();
        store.start_timer();
        let (_subscription, events) = record_events(&store);

        assert!(store.start_timer().unwrap().timer.is_running);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_restores_sessions_and_pointer() {
        let kv = Arc::new(MemoryStore::new());
        let (first, second) = {
            let store = SessionStore::open(Persistence::new(kv.clone()));
            let first = store.create_session("A").unwrap();
            let second = store.create_session("B").unwrap();
            store.select_session(&first).unwrap();
            store
                .update_messages(MessagesPatch {
                    long_message: Some("Five minutes left".to_string()),
                    ..MessagesPatch::default()
                })
                .unwrap();
            (first, second)
        };

        let reopened = SessionStore::open(Persistence::new(kv));
        let ids: Vec<String> = reopened.sessions().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first.clone(), second]);
        let active = reopened.active_session().unwrap();
        assert_eq!(active.id, first);
        assert_eq!(active.messages.long_message, "Five minutes left");
    }
}
