//! Gateway Guard
//!
//! A shared-secret request gate built with Tokio and Axum.
//!
//! ```text
//!                         ┌──────────────────────────────────────┐
//!                         │            GATEWAY GUARD             │
//!                         │                                      │
//!     Client Request      │  ┌─────────┐       ┌─────────────┐   │
//!     ────────────────────┼─▶│  gate   │──────▶│   forward   │───┼───▶ Upstream
//!                         │  │ (secret)│ allow │   handler   │   │     Backend
//!                         │  └────┬────┘       └─────────────┘   │
//!                         │       │ reject                       │
//!     403 Forbidden       │       ▼                              │
//!     ◀───────────────────┼── {"detail": "Forbidden"}            │
//!                         │                                      │
//!                         │  config · observability · lifecycle  │
//!                         └──────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;

use gateway_guard::config::{load_config, GuardConfig};
use gateway_guard::http::HttpServer;
use gateway_guard::lifecycle::Shutdown;
use gateway_guard::observability::{logging, metrics};

/// Environment variable naming the config file. Missing file means
/// built-in defaults.
const CONFIG_PATH_ENV_VAR: &str = "GATEWAY_GUARD_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path =
        std::env::var(CONFIG_PATH_ENV_VAR).unwrap_or_else(|_| "guard.toml".to_string());

    let config = if Path::new(&config_path).exists() {
        load_config(Path::new(&config_path))?
    } else {
        GuardConfig::default()
    };

    logging::init_tracing(&config.observability.log_level);

    tracing::info!("gateway-guard v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        gating_enabled = config.gate.secret.is_some()
            || std::env::var_os(gateway_guard::config::SECRET_ENV_VAR).is_some(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
