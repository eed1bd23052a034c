//! Server mode
//!
//! Builds the HTTP server from [`StaticConfig`] and runs it until it exits or
//! a shutdown signal arrives.

use std::time::Duration;

use actix_web::HttpServer;
use anyhow::Result;
use tracing::{error, info};

use crate::api::build_app;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(&config).map_err(|e| {
        error!("Server startup failed: {}", e);
        e
    })?;

    let store = startup.store;
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    let mut server = HttpServer::new(move || build_app(store.clone()))
        .disable_signals()
        .shutdown_timeout(config.server.shutdown_timeout_secs);

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let server = server.bind(&startup.bind_address)?.run();
    info!("Listening on http://{}", startup.bind_address);

    let handle = server.handle();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(handle, shutdown_timeout) => {
            info!("Graceful shutdown completed");
        }
    }

    Ok(())
}
