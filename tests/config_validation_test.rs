use std::io::Write;

use diginativa::config::{AppConfig, LogFormat, ServerConfig, StorageBackendKind, TokenEntry};
use diginativa::storage::StorageConfig;
use tempfile::NamedTempFile;

#[test]
fn defaults_are_valid() {
    let config = AppConfig::default();
    config.validate().expect("default configuration should be valid");

    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.service_name, "diginativa-api");
    assert!(config.cors.allows_any_origin());
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn zero_timeout_is_rejected() {
    let config = AppConfig {
        server: ServerConfig {
            request_timeout_secs: 0,
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn empty_token_subject_is_rejected() {
    let mut config = AppConfig::default();
    config.auth.tokens.push(TokenEntry {
        token: "abc".into(),
        subject: "  ".into(),
    });

    assert!(config.validate().is_err());
}

#[test]
fn loads_toml_file() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9100
service_name = "catalogue"

[storage]
backend = "memory"

[logging]
level = "debug"
format = "text"

[[auth.tokens]]
token = "Secret-Token"
subject = "alice"

[cors]
allowed_origins = ["https://kommun.example"]
"#
    )
    .unwrap();

    let config = AppConfig::load_from(file.path()).expect("config should load");

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.service_name, "catalogue");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert_eq!(
        config.auth.token_table().get("Secret-Token").map(String::as_str),
        Some("alice")
    );
    assert!(!config.cors.allows_any_origin());
    assert_eq!(config.storage.backend, StorageBackendKind::Memory);
    assert!(matches!(config.storage_runtime(), StorageConfig::Memory));
}

#[test]
fn unknown_storage_backend_is_rejected() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(file, "[storage]\nbackend = \"postgres\"").unwrap();

    assert!(AppConfig::load_from(file.path()).is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.server.port, 8000);
    assert_eq!(config.logging.level, "info");
}
