// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Pearanoid vault backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// File name of the vault document inside the data root.
pub const VAULT_FILE_NAME: &str = "vault.db";

/// Top-level Pearanoid configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PearanoidConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Vault storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Access guard settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PearanoidConfig {
    /// Copy of this configuration safe to print or log.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.auth.token.is_some() {
            copy.auth.token = Some("[redacted]".to_string());
        }
        copy
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on a request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Send permissive CORS headers, for a browser client served from another origin.
    #[serde(default)]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            cors_permissive: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

/// Vault storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Data root directory. The vault document lives at `<data_path>/vault.db`.
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}

impl StorageConfig {
    /// Full path of the vault document.
    pub fn vault_path(&self) -> PathBuf {
        PathBuf::from(&self.data_path).join(VAULT_FILE_NAME)
    }
}

fn default_data_path() -> String {
    "/data".to_string()
}

/// Access guard configuration.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Expected bearer secret. `None` or empty disables the guard.
    #[serde(default, deserialize_with = "deserialize_token")]
    pub token: Option<String>,

    /// Explicit opt-in to running without a token (development only).
    #[serde(default)]
    pub allow_unauthenticated: bool,
}

impl AuthConfig {
    /// The configured token, treating an empty string as absent.
    pub fn effective_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("allow_unauthenticated", &self.allow_unauthenticated)
            .finish()
    }
}

/// Accept a bare TOML integer (`token = 12345`) as text.
fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawToken {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(
        Option::<RawToken>::deserialize(deserializer)?.map(|raw| match raw {
            RawToken::Text(s) => s,
            RawToken::Signed(n) => n.to_string(),
            RawToken::Unsigned(n) => n.to_string(),
        }),
    )
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_deployment() {
        let config = PearanoidConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.data_path, "/data");
        assert_eq!(config.storage.vault_path(), PathBuf::from("/data/vault.db"));
        assert!(config.auth.token.is_none());
        assert!(!config.auth.allow_unauthenticated);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_token_is_not_effective() {
        let auth = AuthConfig {
            token: Some(String::new()),
            allow_unauthenticated: false,
        };
        assert_eq!(auth.effective_token(), None);
    }

    #[test]
    fn auth_debug_redacts_token() {
        let auth = AuthConfig {
            token: Some("hunter2".to_string()),
            allow_unauthenticated: false,
        };
        let debug = format!("{auth:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn redacted_copy_hides_token() {
        let mut config = PearanoidConfig::default();
        config.auth.token = Some("hunter2".to_string());
        let rendered = toml::to_string(&config.redacted()).unwrap();
        assert!(!rendered.contains("hunter2"));
        assert_eq!(config.auth.token.as_deref(), Some("hunter2"));
    }

    #[test]
    fn numeric_token_in_toml_is_accepted() {
        let config: PearanoidConfig = toml::from_str("[auth]\ntoken = 12345\n").unwrap();
        assert_eq!(config.auth.token.as_deref(), Some("12345"));
    }
}
