//! DigiNativa API - feature catalogue and progress dashboard service
//!
//! The service exposes:
//! - Paginated listing, lookup and creation of features under `/api/v1/features`
//! - Per-caller progress dashboards behind a bearer-token boundary
//! - Unauthenticated health endpoints
//!
//! Storage, token introspection and progress data are injected behind traits.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod feature;
pub mod progress;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
