//! In-memory link storage
//!
//! Both maps live behind one `RwLock`. Lookups share the read lock; creates
//! and visit appends take the write lock. Id generation runs while the write
//! lock is held, so the collision check and the insert are a single step.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::LinkStore;
use super::models::{NewVisit, ShortUrl, Visit};
use crate::errors::{Result, SnaplinkError};
use crate::utils::IdGenerator;

pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 5;

#[derive(Default)]
struct Tables {
    urls: HashMap<String, ShortUrl>,
    visits: HashMap<String, Vec<Visit>>,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    generator: IdGenerator,
    max_attempts: usize,
}

impl MemoryStore {
    pub fn new(generator: IdGenerator, max_attempts: usize) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            generator,
            max_attempts,
        }
    }

    /// Number of stored short urls.
    pub fn len(&self) -> usize {
        self.tables.read().urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All visits recorded under `url_id`, oldest first.
    pub fn visits(&self, url_id: &str) -> Vec<Visit> {
        self.tables
            .read()
            .visits
            .get(url_id)
            .cloned()
            .unwrap_or_default()
    }

    fn next_free_id(&self, tables: &Tables) -> Result<String> {
        for attempt in 1..=self.max_attempts {
            let id = self.generator.generate()?;
            if !tables.urls.contains_key(&id) {
                return Ok(id);
            }
            debug!("Short id collision on attempt {}: {}", attempt, id);
        }

        warn!(
            "Gave up generating a short id after {} attempts ({} urls stored, id space {})",
            self.max_attempts,
            tables.urls.len(),
            self.generator.id_space()
        );
        Err(SnaplinkError::id_exhausted("could not generate URL ID"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(IdGenerator::default(), DEFAULT_MAX_ID_ATTEMPTS)
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn create_url(&self, url: &str) -> Result<ShortUrl> {
        let mut tables = self.tables.write();
        let id = self.next_free_id(&tables)?;

        let now = Utc::now();
        let record = ShortUrl {
            id: id.clone(),
            url: url.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.urls.insert(id, record.clone());

        Ok(record)
    }

    async fn get_url(&self, id: &str) -> Result<ShortUrl> {
        self.tables
            .read()
            .urls
            .get(id)
            .cloned()
            .ok_or_else(|| SnaplinkError::not_found("url not found"))
    }

    async fn register_visit(&self, url_id: &str, visit: NewVisit) -> Result<()> {
        let visit = visit.into_visit(url_id, Utc::now());
        self.tables
            .write()
            .visits
            .entry(url_id.to_string())
            .or_default()
            .push(visit);
        Ok(())
    }

    fn is_plausible_id(&self, id: &str) -> bool {
        self.generator.is_valid_id(id)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
