// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, a usable port, and coherent sweeper timings.

use crate::diagnostic::ConfigError;
use crate::model::SlabdeskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SlabdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must not be 0".to_string());
    }

    for origin in &config.server.allowed_origins {
        if origin.is_empty() || !origin.chars().all(|c| c.is_ascii_graphic()) {
            fail(format!(
                "server.allowed_origins entry `{origin}` is not a valid origin"
            ));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.follow_up.due_after_hours < 1 {
        fail("follow_up.due_after_hours must be at least 1".to_string());
    }

    if config.follow_up.default_assignee.trim().is_empty() {
        fail("follow_up.default_assignee must not be empty".to_string());
    }

    let sweeper = &config.sweeper;
    if sweeper.interval_secs < 1 {
        fail("sweeper.interval_secs must be at least 1".to_string());
    }
    if sweeper.retry_backoff_secs < 1 {
        fail("sweeper.retry_backoff_secs must be at least 1".to_string());
    }
    if sweeper.retry_backoff_secs > sweeper.max_retry_backoff_secs {
        fail(format!(
            "sweeper.retry_backoff_secs ({}) must not exceed sweeper.max_retry_backoff_secs ({})",
            sweeper.retry_backoff_secs, sweeper.max_retry_backoff_secs
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
