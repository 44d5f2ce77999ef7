// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pearanoid vault backend.
//!
//! This crate provides the vault document model, the shared error type, and
//! the storage trait that the gateway is written against. Storage backends
//! implement [`VaultRepository`].

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PearanoidError;
pub use traits::VaultRepository;
pub use types::{HealthStatus, Vault, VaultEntry, CURRENT_VAULT_VERSION};
