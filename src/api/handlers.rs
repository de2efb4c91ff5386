//! API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::extract::{Caller, JsonBody, PathParam, QueryParams};
use crate::api::{ApiError, AppState};
use crate::feature::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::types::{Category, Feature, FeaturePage, ProgressDetail, ProgressSummary, TimePeriod};

/// Service banner
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} is running", state.service_name),
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: None,
    })
}

/// Liveness probe that also names the service
pub async fn api_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: Some(state.service_name.to_string()),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// List features, one page at a time
pub async fn list_features(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<FeaturePage>, ApiError> {
    let request = PageRequest::new(
        query.page.unwrap_or(DEFAULT_PAGE.into()),
        query.page_size.unwrap_or(DEFAULT_PAGE_SIZE.into()),
    )?;

    Ok(Json(state.features.list(request).await?))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Fetch one feature
pub async fn get_feature(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Result<Json<Feature>, ApiError> {
    Ok(Json(state.features.get(&id).await?))
}

/// Create a feature
pub async fn create_feature(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> Result<(StatusCode, Json<Feature>), ApiError> {
    let feature = state.features.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(feature)))
}

/// Overall progress for the authenticated caller
pub async fn progress_summary(
    Caller(caller): Caller,
    State(state): State<AppState>,
) -> Result<Json<ProgressSummary>, ApiError> {
    let summary = state.progress.summary(&caller).await?;
    tracing::debug!(subject = %caller.subject, "Served progress summary");
    Ok(Json(summary))
}

/// Per-category progress for the authenticated caller
pub async fn progress_details(
    Caller(caller): Caller,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DetailsQuery>,
) -> Result<Json<ProgressDetailsResponse>, ApiError> {
    let items = state
        .progress
        .details(&caller, query.time_period, query.category)
        .await?;

    tracing::debug!(
        subject = %caller.subject,
        time_period = ?query.time_period,
        category = ?query.category,
        items = items.len(),
        "Served progress details"
    );

    Ok(Json(ProgressDetailsResponse { items }))
}

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    pub time_period: TimePeriod,
    #[serde(default)]
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct ProgressDetailsResponse {
    pub items: Vec<ProgressDetail>,
}

/// Uniform envelope for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

/// Uniform envelope for a known route called with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
