//! Workout Timer - timed intervals chained into workouts
//!
//! This is the main entry point for the workout-timer daemon.

use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use workout_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    store::JsonFileStore,
    tasks::TickerHandle,
    utils::{shutdown_signal, shutdown_signals},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("workout_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting workout-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, data_dir={}, tick={}ms",
          config.host, config.port, config.data_dir.display(), config.tick_period().as_millis());

    let signals = shutdown_signals()?;

    // Create application state from the saved timer list
    let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    let state = Arc::new(AppState::new(store, config.tick_period(), config.host.clone(), config.port));

    // Start the workout ticker background task
    let mut ticker = TickerHandle::spawn(Arc::clone(&state));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /workout        - Current workout state");
    info!("  POST   /timers         - Add a timer");
    info!("  DELETE /timers/:id     - Remove a timer");
    info!("  POST   /workout/start  - Start or resume the workout");
    info!("  POST   /workout/pause  - Pause the running timer");
    info!("  POST   /workout/resume - Resume the paused timer");
    info!("  POST   /workout/reset  - Reset the workout");
    info!("  POST   /workout/skip   - Skip the active timer");
    info!("  GET    /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app).into_future();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal(signals) => {
            info!("Shutdown signal received");
        }
    }

    ticker.dispose();
    info!("Server shutdown complete");
    Ok(())
}
