// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./slabdesk.toml` > `~/.config/slabdesk/slabdesk.toml` >
//! `/etc/slabdesk/slabdesk.toml` with environment variable overrides via `SLABDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SlabdeskConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/slabdesk/slabdesk.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "slabdesk.toml";

/// Config sections, used to turn `SLABDESK_SECTION_KEY` into `section.key`.
const SECTIONS: &[&str] = &["service", "server", "storage", "follow_up", "sweeper"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/slabdesk/slabdesk.toml` (system-wide)
/// 3. `~/.config/slabdesk/slabdesk.toml` (user XDG config)
/// 4. `./slabdesk.toml` (local directory)
/// 5. `SLABDESK_*` environment variables
pub fn load_config() -> Result<SlabdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SlabdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SlabdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// A missing file is an error here, unlike the XDG hierarchy.
pub fn load_config_from_path(path: &Path) -> Result<SlabdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SlabdeskConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SlabdeskConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/slabdesk/slabdesk.toml`, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("slabdesk").join(LOCAL_CONFIG_FILE))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// `Env::split("_")` would turn `SLABDESK_STORAGE_DATABASE_PATH` into
/// `storage.database.path`, so only the section prefix is split off.
fn env_provider() -> Env {
    Env::prefixed("SLABDESK_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config key.
///
/// `follow_up_due_after_hours` becomes `follow_up.due_after_hours`. Names that
/// do not start with a known section pass through unchanged and are rejected
/// as unknown keys on extraction.
pub fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
            .filter(|r| !r.is_empty())
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
