// ABOUTME: Server resources, router assembly, and HTTP listener startup
// ABOUTME: Builds collaborators from configuration and serves the platform API with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! HTTP server
//!
//! [`ServerResources`] owns every long-lived handle. Route modules receive it
//! as `Arc<ServerResources>` state.

use crate::admin::PlatformJwtManager;
use crate::config::environment::{EmailTransportKind, ServerConfig};
use crate::database_plugins::factory::Database;
use crate::identity::{HttpIdentityProvider, IdentityProvider};
use crate::middleware::with_request_tracing;
use crate::notifications::{EmailTransport, HttpEmailTransport, LogEmailTransport};
use crate::provisioning::ProvisioningOrchestrator;
use crate::routes::{HealthRoutes, ProvisioningRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};

/// Shared state handed to every route module
#[derive(Clone)]
pub struct ServerResources {
    /// Relational store
    pub database: Database,
    /// Provisioning workflow
    pub orchestrator: ProvisioningOrchestrator,
    /// Platform token verification
    pub jwt_manager: PlatformJwtManager,
    /// Request body limit in bytes
    pub max_request_body_bytes: usize,
}

impl ServerResources {
    /// Assemble resources from already-built collaborators
    #[must_use]
    pub fn new(
        database: Database,
        identity: Arc<dyn IdentityProvider>,
        email: Arc<dyn EmailTransport>,
        jwt_manager: PlatformJwtManager,
        config: &ServerConfig,
    ) -> Self {
        let orchestrator = ProvisioningOrchestrator::new(
            database.clone(),
            identity,
            email,
            config.provisioning.clone(),
        );
        Self {
            database,
            orchestrator,
            jwt_manager,
            max_request_body_bytes: config.max_request_body_bytes,
        }
    }

    /// Build the HTTP collaborators described by `config`
    ///
    /// # Errors
    /// Returns an error if the email transport configuration is incomplete
    pub fn from_config(database: Database, config: &ServerConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.collaborator_timeout_secs);

        let identity: Arc<dyn IdentityProvider> =
            Arc::new(HttpIdentityProvider::new(&config.identity, timeout));

        let email: Arc<dyn EmailTransport> = match config.email.transport {
            EmailTransportKind::Http => Arc::new(
                HttpEmailTransport::from_config(&config.email, timeout)
                    .context("Failed to configure HTTP email transport")?,
            ),
            EmailTransportKind::Log => Arc::new(LogEmailTransport),
        };

        let jwt_manager = PlatformJwtManager::new(config.platform_jwt_secret.expose().as_bytes());

        Ok(Self::new(database, identity, email, jwt_manager, config))
    }
}

/// Assemble the full router with tracing and body-limit layers
pub fn router(resources: Arc<ServerResources>) -> Router {
    let limit = resources.max_request_body_bytes;
    let app = Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(ProvisioningRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(limit));

    with_request_tracing(app)
}

/// Bind and serve until Ctrl+C or SIGTERM
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>, config: &ServerConfig) -> Result<()> {
    let address = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {address}"))?;

    info!(address = %address, "Gatehouse server listening");

    axum::serve(listener, router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
