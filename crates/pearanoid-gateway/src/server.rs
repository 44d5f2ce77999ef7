// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the vault API.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::get,
};
use pearanoid_core::{PearanoidError, VaultRepository};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{AccessGuard, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The vault document store.
    pub store: Arc<dyn VaultRepository>,
}

/// Gateway server configuration.
///
/// Mirrors `[server]` from `pearanoid-config` so the gateway does not
/// depend on the config crate.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind (0 picks a free port).
    pub port: u16,
    /// Request body cap in bytes; larger bodies get 413.
    pub max_body_bytes: usize,
    /// Attach a permissive CORS layer.
    pub cors_permissive: bool,
}

/// Build the router:
/// - GET /api/health (no auth)
/// - GET /api/ready (no auth)
/// - GET, POST /api/vault (bearer auth)
pub fn build_router(config: &ServerConfig, state: GatewayState, guard: AccessGuard) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(handlers::get_public_health))
        .route("/api/ready", get(handlers::get_ready))
        .with_state(state.clone());

    let vault_routes = Router::new()
        .route(
            "/api/vault",
            get(handlers::get_vault).post(handlers::post_vault),
        )
        .route_layer(axum_middleware::from_fn_with_state(guard, auth_middleware))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(vault_routes)
        .layer(TraceLayer::new_for_http());

    if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind the listener for `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, PearanoidError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| PearanoidError::Internal(format!("failed to bind {addr}: {e}")))
}

/// Serve `app` on `listener` until `shutdown` is cancelled, then drain
/// in-flight requests.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), PearanoidError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("vault API listening on {addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| PearanoidError::Internal(format!("server error: {e}")))?;

    tracing::info!("vault API stopped");
    Ok(())
}

/// Bind and serve in one step.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    guard: AccessGuard,
    shutdown: CancellationToken,
) -> Result<(), PearanoidError> {
    let listener = bind(config).await?;
    serve(listener, build_router(config, state, guard), shutdown).await
}
