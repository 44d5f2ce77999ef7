// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository trait for the single vault document.

use async_trait::async_trait;

use crate::error::PearanoidError;
use crate::types::{HealthStatus, Vault};

/// Durable read/write access to the deployment's one vault document.
///
/// Implementations must guarantee that `load` never observes a partially
/// written document, even when it races a `save`.
#[async_trait]
pub trait VaultRepository: Send + Sync + 'static {
    /// Returns the stored document bytes exactly as last written, or the
    /// serialized default vault when nothing has been saved yet.
    async fn load(&self) -> Result<Vec<u8>, PearanoidError>;

    /// Validates and wholly replaces the stored document.
    ///
    /// Rejected documents leave the stored document untouched.
    async fn save(&self, vault: &Vault) -> Result<(), PearanoidError>;

    /// Reports whether the backing storage is usable.
    async fn health_check(&self) -> Result<HealthStatus, PearanoidError>;
}
