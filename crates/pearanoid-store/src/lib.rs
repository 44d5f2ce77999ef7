// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem persistence for the Pearanoid vault document.
//!
//! The deployment's single vault lives at `<data-root>/vault.db`. Writes go
//! to a sibling temp file that is renamed over the target, and all access is
//! funneled through one lock per store, so readers only ever see a complete
//! document.

pub mod store;
pub mod writer;

pub use store::FileVaultStore;
