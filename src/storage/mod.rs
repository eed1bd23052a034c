use std::sync::Arc;

use async_trait::async_trait;

use crate::config::IdConfig;
use crate::errors::Result;
use crate::utils::IdGenerator;

pub mod memory;
pub mod models;

pub use memory::MemoryStore;
pub use models::{NewVisit, ShortUrl, Visit};

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Stores `url` under a freshly generated id and returns the new record.
    async fn create_url(&self, url: &str) -> Result<ShortUrl>;

    /// Returns the record for `id`, or a `NotFound` error.
    async fn get_url(&self, id: &str) -> Result<ShortUrl>;

    /// Appends a visit under `url_id`. The id is not checked against stored
    /// records; callers look the url up first.
    async fn register_visit(&self, url_id: &str, visit: NewVisit) -> Result<()>;

    /// Cheap syntactic check so lookups for impossible ids skip the store.
    fn is_plausible_id(&self, _id: &str) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(ids: &IdConfig) -> Arc<dyn LinkStore> {
        let generator = IdGenerator::new(ids.length);
        Arc::new(MemoryStore::new(generator, ids.max_attempts))
    }
}
