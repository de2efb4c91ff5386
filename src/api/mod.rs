//! HTTP API server

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsSection;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::api_health))
        .route(
            "/api/v1/features",
            get(handlers::list_features).post(handlers::create_feature),
        )
        .route("/api/v1/features/:id", get(handlers::get_feature))
        .route("/api/v1/dashboard/progress", get(handlers::progress_summary))
        .route(
            "/api/v1/dashboard/progress/details",
            get(handlers::progress_details),
        )
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(error::handle_panic))
                .layer(middleware::from_fn_with_state(timeout, enforce_timeout)),
        )
        .with_state(state)
}

/// Drop the request future once `timeout` elapses. Any store call in flight
/// is cancelled along with it.
async fn enforce_timeout(
    State(timeout): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%method, %uri, ?timeout, "Request timed out");
            ApiError::timeout().into_response()
        }
    }
}

/// CORS policy from configuration; `"*"` allows any origin.
pub fn cors_layer(config: &CorsSection) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
