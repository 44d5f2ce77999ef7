// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access guard for the vault endpoints.
//!
//! A request is authorized when its `Authorization` header is exactly
//! `Bearer <token>`. When no token is configured every request is
//! authorized; the binary only allows that with an explicit opt-in and logs
//! a warning at startup.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

/// Scheme prefix expected in front of the token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Shared-secret check applied to every vault request.
#[derive(Clone)]
pub struct AccessGuard {
    /// Full expected header value (`Bearer <token>`), or `None` when disabled.
    expected: Option<Arc<[u8]>>,
}

impl AccessGuard {
    /// Guard expecting `token`. `None` or an empty token disables the guard.
    pub fn new(token: Option<&str>) -> Self {
        let expected = token
            .filter(|t| !t.is_empty())
            .map(|t| Arc::from(format!("{BEARER_PREFIX}{t}").into_bytes()));
        Self { expected }
    }

    /// Guard that authorizes everything.
    pub fn disabled() -> Self {
        Self { expected: None }
    }

    /// Whether a token is being enforced.
    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    /// Check a request's headers.
    ///
    /// Missing header, wrong scheme, or wrong token all deny. The header is
    /// compared as raw bytes in constant time.
    pub fn authorize(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = self.expected.as_deref() else {
            return true;
        };

        headers
            .get(AUTHORIZATION)
            .is_some_and(|value| bool::from(value.as_bytes().ct_eq(expected)))
    }
}

impl std::fmt::Debug for AccessGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGuard")
            .field("bearer_token", &self.expected.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Middleware rejecting unauthorized requests with an empty 401.
pub async fn auth_middleware(
    State(guard): State<AccessGuard>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if guard.authorize(request.headers()) {
        return Ok(next.run(request).await);
    }

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        has_header = request.headers().contains_key(AUTHORIZATION),
        "request rejected by access guard"
    );
    Err(StatusCode::UNAUTHORIZED)
}
