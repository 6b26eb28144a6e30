//! Countdown background task
//!
//! Owns at most one [`Ticker`] at a time, bound to the active session while
//! its timer runs. Any store event makes the task re-check which session (if
//! any) should be ticking and swap the ticker accordingly.

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::state::{AppState, SessionStore, StoreEvent, TickOutcome};

/// One countdown step
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic tick source for a single session.
///
/// Dropping the ticker aborts its task, so releasing it is unconditional on
/// every path (pause, expiry, session switch, deletion, shutdown).
#[derive(Debug)]
pub struct Ticker {
    session_id: String,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking `session_id` every `period`, first tick one period from now
    pub fn spawn(store: Arc<SessionStore>, session_id: String, period: Duration) -> Self {
        let id = session_id.clone();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            // A late tick pushes the schedule back instead of bursting to catch up
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                // Awaited inline: the next tick cannot start before this one returns
                match store.tick(&id) {
                    Some(TickOutcome::Advanced) => debug!("Tick for session {}", id),
                    Some(TickOutcome::Expired) => debug!("Session {} reached 00.00", id),
                    Some(TickOutcome::Idle) | None => {
                        debug!("Tick for session {} skipped, not the running active session", id)
                    }
                }
            }
        });

        Self { session_id, handle }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Make `ticker` match the store: running only for the active, running session
fn reconcile(store: &Arc<SessionStore>, ticker: &mut Option<Ticker>, period: Duration) {
    let wanted = store
        .active_session()
        .filter(|session| session.timer.is_running)
        .map(|session| session.id);

    let keep = match (&wanted, ticker.as_ref()) {
        (Some(id), Some(current)) => current.session_id() == id && !current.is_finished(),
        (None, None) => true,
        _ => false,
    };
    if keep {
        return;
    }

    if let Some(current) = ticker.take() {
        info!("Stopping countdown ticker for session {}", current.session_id());
    }
    if let Some(id) = wanted {
        info!("Starting countdown ticker for session {}", id);
        *ticker = Some(Ticker::spawn(Arc::clone(store), id, period));
    }
}

/// Drive ticks for the active session until the event channel closes
pub async fn run_countdown(
    store: Arc<SessionStore>,
    mut events: broadcast::Receiver<StoreEvent>,
    period: Duration,
) {
    let mut ticker: Option<Ticker> = None;

    // A session restored as running resumes right away
    reconcile(&store, &mut ticker, period);

    loop {
        match events.recv().await {
            Ok(event) => {
                debug!("Countdown task saw revision {}", event.revision);
                reconcile(&store, &mut ticker, period);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Countdown task lagged behind {} store events", skipped);
                reconcile(&store, &mut ticker, period);
            }
            Err(RecvError::Closed) => {
                info!("Store event channel closed, stopping countdown task");
                break;
            }
        }
    }
}

/// Background task that keeps the active session's countdown ticking
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");
    // Subscribe before the first read of the store so no change slips between
    let events = state.state_change_tx.subscribe();
    run_countdown(Arc::clone(&state.store), events, TICK_PERIOD).await;
}
