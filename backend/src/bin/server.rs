//! Meeus HTTP Server Binary
//!
//! Loads configuration, starts the sidereal and calendar pollers and serves
//! the REST API until interrupted.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin meeus-server
//!
//! # Observer at the US Naval Observatory, port 3000
//! MEEUS_LONGITUDE=-77.0656 MEEUS_LATITUDE=38.9217 MEEUS_PORT=3000 \
//!   cargo run --bin meeus-server
//! ```
//!
//! # Environment Variables
//!
//! - `MEEUS_CONFIG`: Path to a `meeus.toml` file (default: searched)
//! - `MEEUS_HOST`, `MEEUS_PORT`: Bind address (default: 0.0.0.0:8080)
//! - `MEEUS_LONGITUDE`, `MEEUS_LATITUDE`, `MEEUS_LOCATION_NAME`: Observer site
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use meeus_astronomy::config::AppConfig;
use meeus_astronomy::http::{create_router, AppState};
use meeus_astronomy::services::spawn_pollers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Meeus HTTP Server");

    let config = AppConfig::load()?;
    let settings = config.poller_settings()?;
    let reform = settings.reform;

    let (readings, pollers) = spawn_pollers(settings);
    let app = create_router(AppState::new(readings, reform));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pollers.shutdown().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
