//! Storage tests
//!
//! Exercise `MemoryStore` through the `LinkStore` trait object, the same way
//! the HTTP handlers use it.

use std::collections::HashSet;
use std::sync::Arc;

use snaplink::config::IdConfig;
use snaplink::errors::SnaplinkError;
use snaplink::storage::{LinkStore, MemoryStore, NewVisit, StorageFactory};
use snaplink::utils::IdGenerator;

#[tokio::test]
async fn test_factory_builds_memory_store() {
    let store = StorageFactory::create(&IdConfig::default());
    assert_eq!(store.backend_name(), "memory");

    let created = store.create_url("https://example.com").await.unwrap();
    assert_eq!(created.id.len(), 4);
    assert!(store.is_plausible_id(&created.id));
    assert!(!store.is_plausible_id("abc"));
    assert!(!store.is_plausible_id("ab/c"));
}

#[tokio::test]
async fn test_stored_url_is_returned_unchanged() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryStore::default());

    let created = store
        .create_url("https://example.com/path?q=1#frag")
        .await
        .unwrap();
    let fetched = store.get_url(&created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.url, "https://example.com/path?q=1#frag");
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryStore::default());

    let err = store.get_url("ZZZZ").await.unwrap_err();
    assert!(matches!(err, SnaplinkError::NotFound(_)));
    assert_eq!(err.message(), "url not found");
}

#[tokio::test]
async fn test_visits_accumulate_per_url() {
    let memory = Arc::new(MemoryStore::default());
    let store: Arc<dyn LinkStore> = memory.clone();

    let a = store.create_url("https://a.example").await.unwrap();
    let b = store.create_url("https://b.example").await.unwrap();

    for agent in ["first", "second"] {
        store
            .register_visit(
                &a.id,
                NewVisit {
                    ip: "198.51.100.7".to_string(),
                    referer: String::new(),
                    user_agent: agent.to_string(),
                },
            )
            .await
            .unwrap();
    }

    let visits = memory.visits(&a.id);
    assert_eq!(visits.len(), 2);
    assert_eq!(visits[0].user_agent, "first");
    assert_eq!(visits[1].user_agent, "second");
    assert!(visits.iter().all(|v| v.url_id == a.id));
    assert!(memory.visits(&b.id).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_creates_on_tiny_id_space() {
    // 单字符 id 只有 64 种
    let memory = Arc::new(MemoryStore::new(IdGenerator::new(1), 5));

    let handles: Vec<_> = (0..48)
        .map(|i| {
            let store: Arc<dyn LinkStore> = memory.clone();
            tokio::spawn(async move { store.create_url(&format!("https://example.com/{i}")).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(short_url) => assert!(ids.insert(short_url.id), "duplicate id issued"),
            Err(e) => assert!(e.is_generation(), "unexpected error: {e}"),
        }
    }

    assert!(!ids.is_empty());
    assert_eq!(memory.len(), ids.len());
}
