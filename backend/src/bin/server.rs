//! Strike Forecast HTTP Server Binary
//!
//! Loads the configuration, creates the upload directory, sets up the HTTP
//! router and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin strike-server
//!
//! # Custom config file and port
//! STRIKE_CONFIG=./strike-forecast.toml PORT=8080 cargo run --bin strike-server
//! ```
//!
//! # Environment Variables
//!
//! - `STRIKE_CONFIG`: Path of the TOML configuration file
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 5000)
//! - `UPLOAD_DIR`: Upload directory created at startup (default: uploads)
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use strike_forecast::config::AppConfig;
use strike_forecast::http::{create_router, AppState};

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

    info!("Starting Strike Forecast HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        "Model: {} (horizon {} days, date column '{}')",
        config.forecast.model, config.forecast.horizon_days, config.ingest.date_column
    );

    std::fs::create_dir_all(&config.server.upload_dir).with_context(|| {
        format!(
            "Failed to create upload directory {}",
            config.server.upload_dir.display()
        )
    })?;

    let bind_addr = config.bind_addr();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
