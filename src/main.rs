//! Path-prefix forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ────────────────────┼─▶ http server ──▶ routing ──▶ forward ───────┼──▶ Backend
//!                         │   (axum)          mapping      (reqwest)     │
//!                         │                   + rewrite                  │
//!     Client Response     │                                              │
//!     ◀───────────────────┼── response relay ◀───────────────────────────┼─── Backend
//!                         │                                              │
//!                         │   config (TOML + PORT / PATH_MAPPING)        │
//!                         │   watcher ──▶ routing map swap               │
//!                         │   observability · lifecycle                  │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use path_proxy::config::loader::{resolve_config, Overrides};
use path_proxy::config::watcher::ConfigWatcher;
use path_proxy::observability::logging;
use path_proxy::{HttpServer, MappingTable, RoutingMap, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "path-proxy", version, about = "Forward requests by path prefix")]
struct Options {
    /// TOML configuration file, watched for routing changes
    #[arg(long, env = "PROXY_CONFIG")]
    config: Option<PathBuf>,
    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,
    /// JSON object mapping path prefixes to backend hosts
    #[arg(long, env = "PATH_MAPPING")]
    path_mapping: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = dotenvy::dotenv().ok();
    let options = Options::parse();
    logging::init("info");

    if let Some(path) = env_file {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let overrides = Overrides {
        port: options.port,
        path_mapping: options.path_mapping.clone(),
    };

    let config = match resolve_config(options.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        prefixes = config.routing.path_mapping.len(),
        "Configuration loaded"
    );

    let routing = RoutingMap::new(MappingTable::from(&config.routing.path_mapping));

    let _watcher = match &options.config {
        Some(path) => match ConfigWatcher::new(path, overrides, routing.clone()).run() {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::warn!(error = %e, "Config hot reload disabled");
                None
            }
        },
        None => None,
    };

    let server = match HttpServer::new(&config, routing) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize HTTP server");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signal_task = shutdown.trigger_on_signal();

    if let Err(e) = server.run(listener, server_shutdown).await {
        tracing::error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
