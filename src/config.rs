use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::storage::StorageConfig;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageSection,
    pub logging: LoggingSection,
    pub auth: AuthSection,
    pub cors: CorsSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    ///
    /// The file path comes from `DIGINATIVA_CONFIG` (default `config.toml`);
    /// a missing file is not an error.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("DIGINATIVA_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load configuration from `path` overlaid with `DIGINATIVA__*` variables.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = config::Config::builder();

        if path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DIGINATIVA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be greater than zero");
        }
        if self.server.service_name.trim().is_empty() {
            bail!("server.service_name must be specified");
        }
        for entry in &self.auth.tokens {
            if entry.token.trim().is_empty() {
                bail!("auth.tokens must not contain an empty token");
            }
            if entry.subject.trim().is_empty() {
                bail!("auth.tokens entry must map to a non-empty subject");
            }
        }
        Ok(())
    }

    /// Resolve the storage backend configuration.
    pub fn storage_runtime(&self) -> StorageConfig {
        match self.storage.backend {
            StorageBackendKind::Memory => StorageConfig::Memory,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            service_name: "diginativa-api".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StorageSection {
    pub backend: StorageBackendKind,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Memory,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthSection {
    pub tokens: Vec<TokenEntry>,
}

impl AuthSection {
    /// Token -> subject table for the static introspector
    pub fn token_table(&self) -> HashMap<String, String> {
        self.tokens
            .iter()
            .map(|entry| (entry.token.clone(), entry.subject.clone()))
            .collect()
    }
}

/// One opaque bearer token and the subject it resolves to.
///
/// Tokens live in values; config keys are case-folded.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenEntry {
    pub token: String,
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsSection {
    pub allowed_origins: Vec<String>,
}

impl CorsSection {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}
