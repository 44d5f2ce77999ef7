// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the vault REST API.
//!
//! Every error is turned into a response here; nothing propagates past the
//! request boundary.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use pearanoid_core::{HealthStatus, PearanoidError, Vault};

use crate::server::GatewayState;

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
}

/// Response body for GET /api/ready.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// GET /api/health
///
/// Liveness probe. Always `{"status":"ok"}`.
pub async fn get_public_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /api/ready
///
/// Readiness probe: 503 when the data directory is unusable.
pub async fn get_ready(State(state): State<GatewayState>) -> Response {
    match state.store.health_check().await {
        Ok(HealthStatus::Healthy) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ok".to_string(),
                detail: None,
            }),
        )
            .into_response(),
        Ok(HealthStatus::Degraded(detail)) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "degraded".to_string(),
                detail: Some(detail),
            }),
        )
            .into_response(),
        Ok(HealthStatus::Unhealthy(detail)) => {
            tracing::warn!(%detail, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse {
                    status: "unavailable".to_string(),
                    detail: Some(detail),
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/vault
///
/// Returns the stored document bytes unmodified, or the empty default vault.
pub async fn get_vault(State(state): State<GatewayState>) -> Response {
    match state.store.load().await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            bytes,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/vault
///
/// Replaces the stored vault with the request body. The body is parsed
/// regardless of `Content-Type`.
pub async fn post_vault(State(state): State<GatewayState>, body: Bytes) -> Response {
    let result = async {
        let vault = Vault::from_slice(&body)?;
        state.store.save(&vault).await?;
        tracing::info!(entries = vault.entries.len(), "vault replaced");
        Ok::<_, PearanoidError>(())
    }
    .await;

    match result {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => error_response(e),
    }
}

/// Map an error to its response.
///
/// Client errors get a 4xx (with a message only for schema violations);
/// server errors are logged and get a bare 500.
pub fn error_response(err: PearanoidError) -> Response {
    match err {
        PearanoidError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        PearanoidError::Malformed { source } => {
            tracing::debug!(error = %source, "rejected malformed vault document");
            StatusCode::BAD_REQUEST.into_response()
        }
        PearanoidError::Validation { message } => {
            tracing::debug!(%message, "rejected invalid vault document");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        e @ (PearanoidError::Storage { .. }
        | PearanoidError::Config(_)
        | PearanoidError::Internal(_)) => {
            tracing::error!(error = %e, "vault request failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
