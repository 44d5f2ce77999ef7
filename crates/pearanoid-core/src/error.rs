// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pearanoid vault backend.

use thiserror::Error;

/// The primary error type used across the store, gateway, and binary.
///
/// Variants split into client-caused errors (mapped to 4xx at the request
/// boundary) and server-caused errors (mapped to 5xx).
#[derive(Debug, Error)]
pub enum PearanoidError {
    /// Configuration errors detected at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing or invalid credential.
    #[error("unauthorized")]
    Unauthorized,

    /// Request body is not a well-formed vault document.
    #[error("malformed vault document: {source}")]
    Malformed { source: serde_json::Error },

    /// Vault document is well-formed but violates the schema contract.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Storage read/write failure unrelated to client input.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PearanoidError {
    /// Wrap any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Storage { source: err.into() }
    }

    /// Whether the error was caused by the client (4xx) rather than the server (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::Malformed { .. } | Self::Validation { .. }
        )
    }
}

impl From<std::io::Error> for PearanoidError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display_includes_source() {
        let err = PearanoidError::from(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "storage error: disk full");
    }

    #[test]
    fn validation_error_display() {
        let err = PearanoidError::Validation {
            message: "Invalid vault version".into(),
        };
        assert_eq!(err.to_string(), "validation error: Invalid vault version");
    }
}
