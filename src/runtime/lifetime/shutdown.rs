use std::time::Duration;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tokio::time::timeout;
use tracing::{info, warn};

/// Grace added on top of the server's own shutdown timeout before we report
/// that connections were still open.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Wait for Ctrl+C, then stop the server gracefully.
///
/// The server stops accepting connections immediately and gives in-flight
/// requests up to `shutdown_timeout` to finish before dropping them.
pub async fn listen_for_shutdown(handle: ServerHandle, shutdown_timeout: Duration) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, shutting down..");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    stop_server(handle, shutdown_timeout).await;
}

pub async fn stop_server(handle: ServerHandle, shutdown_timeout: Duration) {
    match timeout(shutdown_timeout + SHUTDOWN_GRACE, handle.stop(true)).await {
        Ok(()) => info!("HTTP server stopped"),
        Err(_) => warn!(
            "Not all connections finished within {} seconds",
            shutdown_timeout.as_secs()
        ),
    }
}
