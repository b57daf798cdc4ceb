//! Footfall relay service
//!
//! Ingestion proxy between the site's tracker and the analytics sink:
//! - batch validation and size/rate limiting
//! - per-row sanitization onto the fixed sink schema
//! - server-to-server relay with bounded failure diagnostics

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use relay::{router, AppState, RelayConfig};
use telemetry::init_tracing_from_env;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting footfall relay v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    match &config.sink_url {
        Some(url) => info!(sink = %url, "Sink configured"),
        None => info!("No sink configured, batches will be acknowledged and dropped"),
    }

    // Create application state
    let state = AppState::new(config.clone());

    // Start rate limiter cleanup background task
    let _rate_limiter_cleanup = state.start_rate_limiter_cleanup();

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<RelayConfig> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&RelayConfig::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("FOOTFALL")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: RelayConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for fields the config crate's env parsing handles
    // unreliably (Option and nested values)
    if let Ok(sink_url) = std::env::var("FOOTFALL_SINK_URL") {
        config.sink_url = if sink_url.is_empty() {
            None
        } else {
            Some(sink_url)
        };
    }
    if let Ok(rate) = std::env::var("FOOTFALL_RATE_LIMIT_RATE") {
        if let Ok(rate) = rate.parse() {
            config.rate_limit.rate = rate;
        }
    }
    if let Ok(burst) = std::env::var("FOOTFALL_RATE_LIMIT_BURST") {
        if let Ok(burst) = burst.parse() {
            config.rate_limit.burst = burst;
        }
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
