//! Timekeeper - session-based presentation timer
//!
//! This is the main entry point for the timekeeper server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use timekeeper::{
    api::create_router,
    config::Config,
    persistence::Persistence,
    state::{AppState, SessionStore},
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("timekeeper={},tower_http=info", config.log_level()))
        .init();

    info!("Starting timekeeper v{}", env!("CARGO_PKG_VERSION"));
    if config.ephemeral {
        info!("Configuration: host={}, port={}, storage=memory", config.host, config.port);
    } else {
        info!(
            "Configuration: host={}, port={}, storage={}",
            config.host,
            config.port,
            config.data_dir.display()
        );
    }

    // Open storage and restore sessions
    let storage = config.open_storage()?;
    let store = Arc::new(SessionStore::open(Persistence::new(storage)));
    let state = Arc::new(AppState::new(store, config.port, config.host.clone()));

    // Start the countdown background task
    let countdown = tokio::spawn(countdown_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /sessions               - List sessions and the active id");
    info!("  POST   /sessions               - Create a session");
    info!("  PATCH  /sessions/:id           - Rename or update a session");
    info!("  DELETE /sessions/:id           - Delete a session");
    info!("  POST   /sessions/:id/select    - Make a session active");
    info!("  PATCH  /active/timer|display|messages - Partial updates");
    info!("  POST   /active/timer/start|pause|reset|duration");
    info!("  GET    /display                - Stage display frame");
    info!("  GET    /status, /health");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = wait_for_shutdown() => {
            info!("Shutdown signal received");
        }
    }

    // Stops the ticker along with the task
    countdown.abort();

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on SIGTERM/SIGINT; if handlers cannot be installed, keep serving
async fn wait_for_shutdown() {
    if let Err(e) = shutdown_signal().await {
        tracing::error!("Failed to listen for shutdown signals: {}", e);
        std::future::pending::<()>().await;
    }
}
