// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Pearanoid vault backend.
//!
//! Serves the vault over a small REST surface:
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | GET | `/api/health` | no |
//! | GET | `/api/ready` | no |
//! | GET | `/api/vault` | bearer |
//! | POST | `/api/vault` | bearer |
//!
//! Handlers are written against [`pearanoid_core::VaultRepository`], so any
//! store implementation can sit behind the router.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AccessGuard;
pub use server::{GatewayState, ServerConfig, build_router, start_server};
