//! Rep Counter - an exercise rep/set/break countdown timer served over HTTP
//!
//! This is the main entry point for the rep-counter application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use rep_counter::{
    api::create_router,
    config::Config,
    services::CommandCuePlayer,
    state::AppState,
    store::{ExerciseStore, FileStorage},
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("rep_counter={},tower_http=info", config.log_level()))
        .init();

    info!("Starting rep-counter server v{}", env!("CARGO_PKG_VERSION"));

    let storage_path = config.storage_path();
    info!(
        "Configuration: host={}, port={}, storage={}, muted={}",
        config.host,
        config.port,
        storage_path.display(),
        config.muted
    );

    let store = ExerciseStore::load(Box::new(FileStorage::new(storage_path)));
    let cues = Arc::new(CommandCuePlayer::new(
        config.player.clone(),
        config.short_cue.clone(),
        config.long_cue.clone(),
    ));

    // Create application state
    let state = Arc::new(AppState::new(
        store,
        cues,
        config.muted,
        config.port,
        config.host.clone(),
    ));

    // Start the countdown background task
    let countdown_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(countdown_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /exercises        - List exercises");
    info!("  POST   /exercises        - Add an exercise");
    info!("  PATCH  /exercises/:index - Edit one field of an exercise");
    info!("  DELETE /exercises/:index - Remove an exercise");
    info!("  POST   /timer/start      - Start, resume or restart the timer");
    info!("  POST   /timer/stop       - Pause the timer");
    info!("  POST   /timer/continue   - Move on to the next exercise");
    info!("  POST   /mute             - Toggle audio cues");
    info!("  GET    /status           - Exercises, timer and server info");
    info!("  GET    /health           - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
