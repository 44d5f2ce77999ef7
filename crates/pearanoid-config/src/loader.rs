// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pearanoid.toml` > `~/.config/pearanoid/pearanoid.toml` >
//! `/etc/pearanoid/pearanoid.toml`, with environment variable overrides via the
//! `PEARANOID_` prefix and the unprefixed `PORT`, `DATA_PATH`, `AUTH_TOKEN`
//! variables understood by earlier deployments.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PearanoidConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/pearanoid/pearanoid.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "pearanoid.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "PEARANOID_";

/// Unprefixed variables and the keys they map to.
const LEGACY_ENV: &[(&str, &str)] = &[("port", "server.port"), ("data_path", "storage.data_path")];

/// Token variables, lowest precedence first. Read verbatim: `Env` would parse
/// `007` as a number and `true` as a bool.
const TOKEN_ENV: &[&str] = &["AUTH_TOKEN", "PEARANOID_AUTH_TOKEN"];

/// Location of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pearanoid").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pearanoid/pearanoid.toml` (system-wide)
/// 3. `~/.config/pearanoid/pearanoid.toml` (user XDG config)
/// 4. `./pearanoid.toml` (local directory)
/// 5. `PORT`, `DATA_PATH`, `AUTH_TOKEN`
/// 6. `PEARANOID_*` environment variables
pub fn load_config() -> Result<PearanoidConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PearanoidConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PearanoidConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PearanoidConfig, figment::Error> {
    let figment = Figment::new()
        .merge(Serialized::defaults(PearanoidConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider());
    merge_token_env(figment).extract()
}

/// Build the Figment used for hierarchy loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    let figment = Figment::new()
        .merge(Serialized::defaults(PearanoidConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(legacy_env_provider())
        .merge(env_provider());
    merge_token_env(figment)
}

/// `PEARANOID_*` variables, mapped section-first.
///
/// Uses `Env::map()` NOT `Env::split("_")`: `PEARANOID_STORAGE_DATA_PATH`
/// must map to `storage.data_path`, not `storage.data.path`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).ignore(&["auth_token"]).map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}

/// Unprefixed `PORT`, `DATA_PATH`.
fn legacy_env_provider() -> Env {
    let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        LEGACY_ENV
            .iter()
            .find(|(name, _)| *name == key_str)
            .map(|(_, mapped)| (*mapped).to_string())
            .unwrap_or(key_str)
            .into()
    })
}

/// Merge `auth.token` from the environment as an unparsed string. The
/// prefixed variable wins over `AUTH_TOKEN`.
fn merge_token_env(figment: Figment) -> Figment {
    match TOKEN_ENV.iter().rev().find_map(|name| std::env::var(name).ok()) {
        Some(token) => figment.merge(Serialized::default("auth.token", token)),
        None => figment,
    }
}
