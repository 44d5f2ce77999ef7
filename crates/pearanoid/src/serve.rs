// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pearanoid serve` command implementation.
//!
//! Builds the store and access guard from the validated configuration,
//! prepares the data directory, and runs the HTTP gateway until a shutdown
//! signal arrives.

use std::sync::Arc;

use pearanoid_config::model::{AuthConfig, PearanoidConfig, ServerConfig as ServerSection};
use pearanoid_core::PearanoidError;
use pearanoid_gateway::{AccessGuard, GatewayState, ServerConfig, start_server};
use pearanoid_store::FileVaultStore;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `pearanoid serve` command.
pub async fn run_serve(config: PearanoidConfig) -> Result<(), PearanoidError> {
    init_tracing(&config.logging.level);

    info!(version = env!("CARGO_PKG_VERSION"), "starting pearanoid serve");

    let guard = access_guard(&config.auth)?;

    let store = FileVaultStore::from_config(&config.storage);
    store.ensure_data_root().await?;
    info!(path = %store.path().display(), "using vault file");

    let state = GatewayState {
        store: Arc::new(store),
    };

    let shutdown = shutdown::install_signal_handler();
    start_server(&server_config(&config.server), state, guard, shutdown).await
}

/// Build the access guard, refusing to run open unless explicitly allowed.
fn access_guard(auth: &AuthConfig) -> Result<AccessGuard, PearanoidError> {
    match auth.effective_token() {
        Some(token) => {
            info!("bearer token authentication enabled");
            Ok(AccessGuard::new(Some(token)))
        }
        None if auth.allow_unauthenticated => {
            warn!(
                "AUTHENTICATION DISABLED: no auth.token configured and \
                 auth.allow_unauthenticated = true. Every request can read and \
                 overwrite the vault. Use this for local development only."
            );
            Ok(AccessGuard::disabled())
        }
        None => Err(PearanoidError::Config(
            "auth.token is not set and auth.allow_unauthenticated is false".to_string(),
        )),
    }
}

fn server_config(section: &ServerSection) -> ServerConfig {
    ServerConfig {
        host: section.host.clone(),
        port: section.port,
        max_body_bytes: section.max_body_bytes,
        cors_permissive: section.cors_permissive,
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` takes precedence over the
/// configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pearanoid={level},tower_http={level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
