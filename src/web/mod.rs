//! Web panel server: request dispatch for the page, the sensor snapshot API
//! and the MJPEG stream.
//!
//! Every connection gets its own hyper task, so a long-lived stream client
//! never stalls the JSON endpoint, another stream client, or the producers.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use handlers::AppState;
pub use router::create_app;

use crate::error::{PanelError, Result};
use std::net::SocketAddr;
use tracing::info;

/// Start the web server with the provided configuration and shared state.
///
/// Runs until the process exits; per-client faults are contained in their
/// connection tasks and never surface here.
pub async fn start_web_server(config: WebConfig, state: AppState) -> Result<()> {
    let app = router::create_app(&config, state);

    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| PanelError::config_error(format!("Invalid bind address: {}", e)))?;

    info!("Starting robot panel on http://{}", addr);
    info!("Panel page:   http://{}/", addr);
    info!("Sensor API:   http://{}/api/sensors", addr);
    info!("MJPEG stream: http://{}/stream.mjpg", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PanelError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    // ConnectInfo gives the stream handler the peer address for its
    // connect/disconnect traces.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| PanelError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
