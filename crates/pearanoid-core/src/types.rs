// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault document model and common types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PearanoidError;

/// The only schema version accepted on write.
pub const CURRENT_VAULT_VERSION: i64 = 1;

/// Health status reported by storage health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Storage is fully operational.
    Healthy,
    /// Storage is operational but experiencing issues.
    Degraded(String),
    /// Storage is not operational.
    Unhealthy(String),
}

/// One credential record.
///
/// `password` and `notes` hold ciphertext produced by the client. They are
/// stored and returned verbatim and never interpreted here. Missing or
/// `null` fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Opaque, client-encrypted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    /// Free-text grouping label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: String,
    /// Opaque, client-encrypted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

/// The persisted vault document.
///
/// A missing or `null` `version` decodes as `0` so that it fails
/// [`Vault::validate`] rather than the JSON parse. `"entries": null` is an
/// empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entries: Vec<VaultEntry>,
}

impl Default for Vault {
    fn default() -> Self {
        Self {
            version: CURRENT_VAULT_VERSION,
            entries: Vec::new(),
        }
    }
}

impl Vault {
    /// Parse a vault document from raw request bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PearanoidError> {
        serde_json::from_slice(bytes).map_err(|source| PearanoidError::Malformed { source })
    }

    /// Check the schema contract enforced before every write.
    pub fn validate(&self) -> Result<(), PearanoidError> {
        if self.version != CURRENT_VAULT_VERSION {
            return Err(PearanoidError::Validation {
                message: "Invalid vault version".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize to the compact on-disk representation.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, PearanoidError> {
        serde_json::to_vec(self).map_err(PearanoidError::storage)
    }
}

/// Treat an explicit JSON `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
