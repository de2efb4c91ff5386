//! Request extractors that reject with [`ApiError`]

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header, request::Parts},
};

use crate::api::{ApiError, AppState};
use crate::auth::{parse_bearer, Identity};
use crate::Error;

/// JSON request body; malformed bodies become a 400 envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string; malformed or missing values become a 400 envelope
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// Path parameters; undecodable segments become a 400 envelope
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// Authenticated caller resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| Error::unauthenticated("Not authenticated"))?
            .to_str()
            .map_err(|_| Error::unauthenticated("Malformed authorization header"))?;

        let token = parse_bearer(header)?;
        let identity = state.introspector.introspect(token).await.map_err(|err| {
            tracing::debug!(error = %err, "Rejected bearer token");
            err
        })?;

        Ok(Caller(identity))
    }
}
