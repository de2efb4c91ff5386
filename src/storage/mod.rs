//! Feature storage abstraction layer
//!
//! The service only talks to [`FeatureStore`]; concrete backends are injected
//! at startup so a persistent store can replace the in-memory one without
//! touching the service or the HTTP layer.

use async_trait::async_trait;
use std::sync::Arc;

use crate::types::Feature;
use crate::Result;

pub mod memory;

/// Insertion-ordered collection of features keyed by id
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Append a feature at the end of the collection.
    ///
    /// Fails with a storage error if the id is already present.
    async fn append(&self, feature: Feature) -> Result<()>;

    /// Look up a feature by id
    async fn get(&self, id: &str) -> Result<Option<Feature>>;

    /// Features in `[start, end)` clipped to the collection bounds
    async fn slice(&self, start: usize, end: usize) -> Result<Vec<Feature>>;

    /// Number of stored features
    async fn count(&self) -> Result<usize>;

    /// `slice(start, end)` together with `count()`, observed atomically
    /// with respect to `append`.
    async fn page(&self, start: usize, end: usize) -> Result<(Vec<Feature>, usize)>;
}

/// Storage configuration
#[derive(Debug, Clone, Default)]
pub enum StorageConfig {
    #[default]
    Memory,
}

/// Create storage backend from config
pub fn create_storage(config: StorageConfig) -> Arc<dyn FeatureStore> {
    match config {
        StorageConfig::Memory => Arc::new(memory::MemoryFeatureStore::new()),
    }
}
