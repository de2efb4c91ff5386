//! In-memory feature store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::Feature;
use crate::{Error, Result};

use super::FeatureStore;

#[derive(Default)]
struct Inner {
    features: Vec<Feature>,
    /// id -> position in `features`
    index: HashMap<String, usize>,
}

impl Inner {
    fn clipped(&self, start: usize, end: usize) -> Vec<Feature> {
        let len = self.features.len();
        let end = end.min(len);
        let start = start.min(end);
        self.features[start..end].to_vec()
    }
}

/// Process-local store; writers are serialised by a single `RwLock`.
#[derive(Default)]
pub struct MemoryFeatureStore {
    inner: RwLock<Inner>,
}

impl MemoryFeatureStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeatureStore for MemoryFeatureStore {
    async fn append(&self, feature: Feature) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.index.contains_key(&feature.id) {
            return Err(Error::storage(format!(
                "feature id '{}' already exists",
                feature.id
            )));
        }

        let position = inner.features.len();
        inner.index.insert(feature.id.clone(), position);
        inner.features.push(feature);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Feature>> {
        let inner = self.inner.read().await;
        Ok(inner
            .index
            .get(id)
            .and_then(|&position| inner.features.get(position))
            .cloned())
    }

    async fn slice(&self, start: usize, end: usize) -> Result<Vec<Feature>> {
        let inner = self.inner.read().await;
        Ok(inner.clipped(start, end))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.features.len())
    }

    async fn page(&self, start: usize, end: usize) -> Result<(Vec<Feature>, usize)> {
        let inner = self.inner.read().await;
        Ok((inner.clipped(start, end), inner.features.len()))
    }
}
