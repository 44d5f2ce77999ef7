// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths, and the auth opt-in.

use crate::diagnostic::ConfigError;
use crate::model::PearanoidConfig;

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Smallest accepted `server.max_body_bytes`.
pub const MIN_BODY_BYTES: usize = 1024;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PearanoidConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    if config.server.max_body_bytes < MIN_BODY_BYTES {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.max_body_bytes must be at least {MIN_BODY_BYTES}, got {}",
                config.server.max_body_bytes
            ),
        });
    }

    if config.storage.data_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.data_path must not be empty".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // Running without a token must be an explicit choice.
    if config.auth.effective_token().is_none() && !config.auth.allow_unauthenticated {
        errors.push(ConfigError::Validation {
            message: "auth.token is not set; set it, or set auth.allow_unauthenticated = true \
                      to run without authentication (development only)"
                .to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
