//! Countdown - A state-managed HTTP countdown timer
//!
//! This is the main entry point for the countdown application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown::{
    api::create_router,
    config::Config,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_millis);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.tick_interval()));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start?hours=&minutes=&seconds= - Start a countdown");
    info!("  POST /stop   - Stop the countdown");
    info!("  POST /reset  - Stop the countdown and zero the display");
    info!("  GET  /status - Current state and display");
    info!("  GET  /events - Server-sent countdown updates");
    info!("  GET  /health - Health check");

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

    state.stop_timer();
    info!("Server shutdown complete");
    Ok(())
}
