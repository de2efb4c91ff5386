//! Environment overrides live in their own test binary: the variables are
//! process-global and would leak into the file-based config tests.

use std::io::Write;

use diginativa::config::{AppConfig, LogFormat};
use tempfile::NamedTempFile;

#[test]
fn environment_overrides_file_values() {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9100
service_name = "catalogue"

[logging]
format = "text"
"#
    )
    .unwrap();

    std::env::set_var("DIGINATIVA__SERVER__PORT", "9200");
    std::env::set_var("DIGINATIVA__LOGGING__FORMAT", "json");

    let config = AppConfig::load_from(file.path());

    std::env::remove_var("DIGINATIVA__SERVER__PORT");
    std::env::remove_var("DIGINATIVA__LOGGING__FORMAT");

    let config = config.expect("config should load");
    assert_eq!(config.server.port, 9200);
    assert_eq!(config.logging.format, LogFormat::Json);
    // Values without an override still come from the file.
    assert_eq!(config.server.service_name, "catalogue");
}
