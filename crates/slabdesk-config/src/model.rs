// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Slabdesk.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Slabdesk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SlabdeskConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Follow-up workflow triggered when an estimate is sent.
    #[serde(default)]
    pub follow_up: FollowUpConfig,

    /// Periodic overdue task reminder settings.
    #[serde(default)]
    pub sweeper: SweeperConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Name reported in logs and the health endpoint.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "slabdesk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the listener on.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. An empty list allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("slabdesk").join("slabdesk.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("slabdesk.db"))
        .to_string_lossy()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Follow-up workflow configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FollowUpConfig {
    /// Hours between the estimate being sent and the follow-up task falling due.
    #[serde(default = "default_due_after_hours")]
    pub due_after_hours: u32,

    /// Assignee placed on generated follow-up tasks.
    #[serde(default = "default_assignee")]
    pub default_assignee: String,
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        Self {
            due_after_hours: default_due_after_hours(),
            default_assignee: default_assignee(),
        }
    }
}

fn default_due_after_hours() -> u32 {
    24
}

fn default_assignee() -> String {
    "Unassigned".to_string()
}

/// Reminder sweeper configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SweeperConfig {
    /// Whether `serve` runs the sweeper in the background.
    #[serde(default = "default_sweeper_enabled")]
    pub enabled: bool,

    /// Seconds between successful sweep cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Delay before retrying a failed cycle. Doubles on each consecutive failure.
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,

    /// Upper bound for the retry delay.
    #[serde(default = "default_max_retry_backoff_secs")]
    pub max_retry_backoff_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: default_sweeper_enabled(),
            interval_secs: default_interval_secs(),
            retry_backoff_secs: default_retry_backoff_secs(),
            max_retry_backoff_secs: default_max_retry_backoff_secs(),
        }
    }
}

fn default_sweeper_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    3600
}

fn default_retry_backoff_secs() -> u64 {
    5
}

fn default_max_retry_backoff_secs() -> u64 {
    300
}
