use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::storage::{LinkStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub bind_address: String,
}

/// 准备服务器启动的上下文
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    config.validate()?;

    let store = StorageFactory::create(&config.ids);
    info!(
        "Using storage backend: {} (id length {}, up to {} attempts per id)",
        store.backend_name(),
        config.ids.length,
        config.ids.max_attempts
    );

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        bind_address,
    })
}
