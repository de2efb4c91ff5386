//! Feature management
//!
//! [`FeatureService`] is the use-case layer behind `/api/v1/features`:
//! - paginated listing with a consistent total count
//! - lookup by id
//! - validated creation with server-assigned id and timestamps

use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::storage::FeatureStore;
use crate::types::{Feature, FeaturePage};
use crate::validation::validate_new_feature;
use crate::{Error, Result};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated `(page, page_size)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a page request, rejecting `page < 1` and `page_size` outside `[1, 100]`.
    pub fn new(page: i64, page_size: i64) -> Result<Self> {
        let page = u32::try_from(page)
            .ok()
            .filter(|&p| p >= 1)
            .ok_or_else(|| Error::invalid_request("page must be greater than or equal to 1"))?;
        let page_size = u32::try_from(page_size)
            .ok()
            .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
            .ok_or_else(|| {
                Error::invalid_request(format!("page_size must be between 1 and {MAX_PAGE_SIZE}"))
            })?;

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Half-open `[start, end)` range into the insertion-ordered collection
    pub fn bounds(&self) -> (usize, usize) {
        let size = self.page_size as usize;
        let start = (self.page as usize - 1).saturating_mul(size);
        (start, start.saturating_add(size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Orchestrates validation and storage for features
pub struct FeatureService {
    store: Arc<dyn FeatureStore>,
}

impl FeatureService {
    pub fn new(store: Arc<dyn FeatureStore>) -> Self {
        Self { store }
    }

    /// List one page of features in insertion order
    pub async fn list(&self, request: PageRequest) -> Result<FeaturePage> {
        let (start, end) = request.bounds();
        let (features, total_count) = self.store.page(start, end).await?;

        tracing::debug!(
            page = request.page(),
            page_size = request.page_size(),
            returned = features.len(),
            total_count,
            "Listed features"
        );

        Ok(FeaturePage {
            features,
            total_count,
            page: request.page(),
            page_size: request.page_size(),
        })
    }

    /// Fetch a feature by id
    pub async fn get(&self, id: &str) -> Result<Feature> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound("Feature not found".to_string()))
    }

    /// Validate `payload` and store it as a new feature
    pub async fn create(&self, payload: &Value) -> Result<Feature> {
        let draft = validate_new_feature(payload)?;
        let feature = draft.into_feature(Utc::now());

        self.store.append(feature.clone()).await?;

        tracing::info!(
            feature_id = %feature.id,
            status = %feature.status,
            "Created feature"
        );

        Ok(feature)
    }
}
