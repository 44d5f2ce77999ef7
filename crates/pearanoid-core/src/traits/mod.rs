// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the storage seam.

pub mod repository;

pub use repository::VaultRepository;
