// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Slabdesk configuration system.

use figment::Jail;
use slabdesk_config::diagnostic::ConfigError;
use slabdesk_config::{
    SlabdeskConfig, load_and_validate_path, load_and_validate_str, load_config,
    load_config_from_path, load_config_from_str,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_slabdesk_config() {
    let toml = r#"
[service]
name = "slabdesk-test"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 9000
allowed_origins = ["https://shop.example.com"]

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[follow_up]
due_after_hours = 48
default_assignee = "Front Desk"

[sweeper]
enabled = false
interval_secs = 120
retry_backoff_secs = 2
max_retry_backoff_secs = 30
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.service.name, "slabdesk-test");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert_eq!(
        config.server.allowed_origins,
        vec!["https://shop.example.com"]
    );
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.follow_up.due_after_hours, 48);
    assert_eq!(config.follow_up.default_assignee, "Front Desk");
    assert!(!config.sweeper.enabled);
    assert_eq!(config.sweeper.interval_secs, 120);
    assert_eq!(config.sweeper.retry_backoff_secs, 2);
    assert_eq!(config.sweeper.max_retry_backoff_secs, 30);
}

/// Missing sections use defaults without error.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.service.name, "slabdesk");
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
    assert!(config.storage.wal_mode);
    assert_eq!(config.follow_up.due_after_hours, 24);
    assert_eq!(config.follow_up.default_assignee, "Unassigned");
    assert!(config.sweeper.enabled);
    assert_eq!(config.sweeper.interval_secs, 3600);
}

/// Unknown field in [server] produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[server]
prot = 9000
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "server.prot" && suggestion.as_deref() == Some("port")
        )
    });
    assert!(found, "expected unknown key diagnostic, got: {errors:?}");
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[metrics]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("metrics"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// A string where a number is expected yields an InvalidType diagnostic.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[server]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("string port should be rejected");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key == "server.port")),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_surface_from_load() {
    let toml = r#"
[follow_up]
due_after_hours = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero hours should be rejected");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("due_after_hours"))
    ));
}

/// Environment variables override file values, including underscored section names.
#[test]
fn env_vars_override_files() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "slabdesk.toml",
            r#"
[server]
port = 7000

[follow_up]
due_after_hours = 12
"#,
        )?;
        jail.set_env("SLABDESK_SERVER_PORT", "7100");
        jail.set_env("SLABDESK_FOLLOW_UP_DEFAULT_ASSIGNEE", "Sales Team");
        jail.set_env("SLABDESK_STORAGE_DATABASE_PATH", "/var/lib/slabdesk/env.db");

        let config = load_config()?;
        assert_eq!(config.server.port, 7100);
        assert_eq!(config.follow_up.due_after_hours, 12);
        assert_eq!(config.follow_up.default_assignee, "Sales Team");
        assert_eq!(config.storage.database_path, "/var/lib/slabdesk/env.db");
        Ok(())
    });
}

/// An explicit path is read exactly and still honours env overrides.
#[test]
fn explicit_path_with_env_override() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[sweeper]\ninterval_secs = 90\n")?;
        jail.set_env("SLABDESK_SWEEPER_ENABLED", "false");

        let config = load_config_from_path(std::path::Path::new("custom.toml"))?;
        assert_eq!(config.sweeper.interval_secs, 90);
        assert!(!config.sweeper.enabled);
        Ok(())
    });
}

/// A missing explicit config file is an error rather than silently defaulting.
#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate_path(&dir.path().join("absent.toml"));
    assert!(result.is_err());
}

/// Unknown keys in an explicit file carry a source span into that file.
#[test]
fn unknown_key_in_file_has_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slabdesk.toml");
    std::fs::write(&path, "[storage]\nwal_mdoe = false\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("typo should be rejected");
    let span = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey { span, .. } => *span,
        _ => None,
    });
    let span = span.expect("unknown key should have a span");
    assert_eq!(span.offset(), "[storage]\n".len());
}

/// Serialized defaults round-trip through TOML, which `slabdesk config` relies on.
#[test]
fn defaults_serialize_to_toml() {
    let rendered = toml::to_string_pretty(&SlabdeskConfig::default()).unwrap();
    assert!(rendered.contains("[follow_up]"));
    let reparsed = load_config_from_str(&rendered).unwrap();
    assert_eq!(reparsed.server.port, 8080);
}
