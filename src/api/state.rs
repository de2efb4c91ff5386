//! API server state

use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenIntrospector;
use crate::feature::FeatureService;
use crate::progress::ProgressSource;
use crate::storage::FeatureStore;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Feature use cases
    pub features: Arc<FeatureService>,

    /// Progress dashboard data
    pub progress: Arc<dyn ProgressSource>,

    /// Bearer token resolution for authenticated routes
    pub introspector: Arc<dyn TokenIntrospector>,

    /// Name reported by the health endpoints
    pub service_name: Arc<str>,

    /// Upper bound on a single request
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn FeatureStore>,
        progress: Arc<dyn ProgressSource>,
        introspector: Arc<dyn TokenIntrospector>,
    ) -> Self {
        Self {
            features: Arc::new(FeatureService::new(store)),
            progress,
            introspector,
            service_name: Arc::from("diginativa-api"),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_service_name(mut self, name: impl AsRef<str>) -> Self {
        self.service_name = Arc::from(name.as_ref());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
