//! End-to-end session scenarios driven through the public store API

use std::sync::Arc;

use tempfile::TempDir;
use timekeeper::{
    persistence::{FileStore, Persistence},
    render::DisplayFrame,
    state::{DisplayMode, DisplayPatch, SessionStore, TickOutcome, TimerState},
};

fn file_store(dir: &TempDir) -> SessionStore {
    let kv = FileStore::open(dir.path()).unwrap();
    SessionStore::open(Persistence::new(Arc::new(kv)))
}

#[test]
fn talk_runs_to_expiry_after_exactly_five_minutes() {
    let store = SessionStore::ephemeral();
    let id = store.create_session("Talk 1").unwrap();

    let session = store.active_session().unwrap();
    assert_eq!(session.timer, TimerState::with_duration(5));
    assert_eq!(session.display.background_color, "#21212b");
    assert_eq!(session.display.text_color, "#f5f5f5");
    assert_eq!(session.display.mode, DisplayMode::Timer);
    assert!(session.messages.short_message.starts_with("Teks Peringatan"));
    assert!(session.messages.long_message.starts_with("Teks pesan"));

    store.start_timer().unwrap();
    let outcomes: Vec<TickOutcome> = (0..301).map(|_| store.tick(&id).unwrap()).collect();

    assert!(outcomes[..300].iter().all(|o| *o == TickOutcome::Advanced));
    assert_eq!(outcomes[300], TickOutcome::Expired);
    assert_eq!(
        store.active_session().unwrap().timer,
        TimerState {
            minutes_remaining: 0,
            seconds_remaining: 0,
            is_running: false,
            total_minutes: 5,
        }
    );
    assert_eq!(store.tick(&id), None);
}

#[test]
fn restart_restores_running_session_from_disk() {
    let dir = TempDir::new().unwrap();
    let id = {
        let store = file_store(&dir);
        let id = store.create_session("Keynote").unwrap();
        store.set_duration(20).unwrap();
        store
            .update_display(DisplayPatch {
                mode: Some(DisplayMode::Message),
                ..DisplayPatch::default()
            })
            .unwrap();
        store.start_timer();
        for _ in 0..90 {
            store.tick(&id);
        }
        id
    };

    let store = file_store(&dir);
    let session = store.active_session().unwrap();
    assert_eq!(session.id, id);
    assert_eq!(session.timer.clock_label(), "18.30");
    assert!(session.timer.is_running);
    assert!(matches!(
        DisplayFrame::for_session(Some(&session)),
        DisplayFrame::Message { .. }
    ));
}

#[test]
fn deleting_active_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let store = file_store(&dir);
        let keep = store.create_session("Morning").unwrap();
        let gone = store.create_session("Afternoon").unwrap();
        store.delete_session(&gone);
        assert_eq!(store.active_session_id(), None);
        assert!(store.session(&keep).is_some());
    }

    let store = file_store(&dir);
    assert_eq!(store.sessions().len(), 1);
    assert_eq!(store.active_session_id(), None);
    assert_eq!(DisplayFrame::for_session(store.active_session().as_ref()), DisplayFrame::NoSession);
}

#[test]
fn corrupt_storage_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("timekeeper_sessions"), "[{\"id\": 1").unwrap();
    std::fs::write(dir.path().join("timekeeper_active_session"), "1").unwrap();

    let store = file_store(&dir);
    assert!(store.sessions().is_empty());
    assert_eq!(store.active_session_id(), None);

    // The store stays usable and overwrites the bad data on the first write
    store.create_session("Fresh").unwrap();
    assert_eq!(file_store(&dir).sessions().len(), 1);
}
