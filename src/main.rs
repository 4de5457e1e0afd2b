//! Gateway dashboard backend.
//!
//! ```text
//!     Dashboard UI
//!          │  x-apisix-url / x-apisix-key on every call
//!          ▼
//!   ┌──────────────┐    ┌────────────┐    ┌──────────────────┐
//!   │ http server  │───▶│ reconcile  │    │ templates +      │
//!   │ (axum)       │    │ diff/plan  │    │ recipes catalog  │
//!   └──────┬───────┘    └─────┬──────┘    └──────────────────┘
//!          │                  │
//!          ▼                  ▼
//!   ┌──────────────────────────────┐
//!   │ gateway client (reqwest)     │──────▶ gateway admin API
//!   └──────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use gateway_dashboard::config::watcher::ConfigWatcher;
use gateway_dashboard::config::{load_config, DashboardConfig};
use gateway_dashboard::http::HttpServer;
use gateway_dashboard::lifecycle::{signals, Shutdown};
use gateway_dashboard::observability::{logging, metrics};
use gateway_dashboard::templates::TemplateCatalog;

#[derive(Parser)]
#[command(name = "gateway-dashboard")]
#[command(about = "Backend for the API gateway dashboard", long_about = None)]
struct Args {
    /// Path to the TOML config file; built-in defaults when omitted
    #[arg(short, long, env = "GATEWAY_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gateway-dashboard starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.listener.request_timeout_secs,
        gateway_timeout_secs = config.gateway.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let templates = match &config.templates.path {
        Some(path) => {
            let catalog = TemplateCatalog::from_file(path, config.templates.format)?;
            tracing::info!(path = ?path, plugins = catalog.len(), "Loaded template catalog");
            catalog
        }
        None => TemplateCatalog::builtin(),
    };

    // The watcher handle must stay alive for reload events to keep flowing.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            match watcher.run() {
                Ok(handle) => (Some(handle), updates),
                Err(e) => {
                    tracing::warn!(error = %e, "Config hot reload disabled");
                    (None, updates)
                }
            }
        }
        None => (None, mpsc::unbounded_channel().1),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::watch(shutdown.clone()));

    let server = HttpServer::new(config, templates)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
