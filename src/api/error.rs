//! Mapping of internal failures onto HTTP responses
//!
//! Every failure leaves the server as `{"detail": ...}` (plus `violations` for
//! payload validation). Storage and internal errors are logged here and
//! replaced by a fixed message.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;

use crate::error::Violation;
use crate::Error;

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
    violations: Option<Vec<Violation>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<&'a [Violation]>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            violations: None,
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn timeout() -> Self {
        Self::new(StatusCode::REQUEST_TIMEOUT, "Request timed out")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidRequest(msg) => Self::bad_request(msg),
            Error::Validation(violations) => Self {
                status: StatusCode::BAD_REQUEST,
                detail: "Validation failed".to_string(),
                violations: Some(violations),
            },
            Error::Unauthenticated(msg) => Self::new(StatusCode::UNAUTHORIZED, msg),
            Error::NotFound(msg) => Self::not_found(msg),
            err @ (Error::Storage(_) | Error::Internal(_)) => {
                tracing::error!(error = %err, "Request failed");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            detail: &self.detail,
            violations: self.violations.as_deref(),
        });
        let mut response = (self.status, body).into_response();

        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Converts a handler panic into the generic 500 envelope.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = message, "Handler panicked");

    ApiError::internal().into_response()
}
