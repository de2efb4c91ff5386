//! Caller authentication boundary
//!
//! A caller presents an opaque bearer token; a [`TokenIntrospector`] either
//! resolves it to an [`Identity`] or rejects it. Token formats are left to the
//! introspection backend.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::{Error, Result};

/// Resolved caller identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// Token introspection port
#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    /// Resolve `token` to a caller, failing with [`Error::Unauthenticated`].
    async fn introspect(&self, token: &str) -> Result<Identity>;
}

/// Fixed token table, configured under `[auth.tokens]`
#[derive(Debug, Clone, Default)]
pub struct StaticTokenIntrospector {
    tokens: HashMap<String, String>,
}

impl StaticTokenIntrospector {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }

    pub fn with_token(mut self, token: impl Into<String>, subject: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), subject.into());
        self
    }
}

#[async_trait]
impl TokenIntrospector for StaticTokenIntrospector {
    async fn introspect(&self, token: &str) -> Result<Identity> {
        self.tokens
            .get(token)
            .map(Identity::new)
            .ok_or_else(|| Error::unauthenticated("Invalid authentication credentials"))
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: &str) -> Result<&str> {
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthenticated("Malformed authorization header"))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::unauthenticated("Unsupported authorization scheme"));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthenticated("Missing bearer token"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_header() {
        assert_eq!(parse_bearer("Bearer abc").unwrap(), "abc");
        assert_eq!(parse_bearer("bearer  abc ").unwrap(), "abc");
        assert!(parse_bearer("Basic dXNlcjpwdw==").is_err());
        assert!(parse_bearer("Bearer").is_err());
        assert!(parse_bearer("Bearer   ").is_err());
    }

    #[tokio::test]
    async fn static_tokens_resolve_subjects() {
        let introspector = StaticTokenIntrospector::default().with_token("t-1", "alice");

        assert_eq!(
            introspector.introspect("t-1").await.unwrap(),
            Identity::new("alice")
        );
        assert!(matches!(
            introspector.introspect("t-2").await,
            Err(Error::Unauthenticated(_))
        ));
    }
}
