// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports service identity and relational store reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Health check routes for service monitoring

use crate::constants::{routes, service_names};
use crate::database_plugins::DatabaseProvider;
use crate::server::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::HEALTH, get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let (status, database) = match resources.database.health_check().await {
            Ok(()) => (StatusCode::OK, "ok"),
            Err(e) => {
                warn!(error = %e, "Health check: database unreachable");
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
            }
        };

        let body = json!({
            "status": if status == StatusCode::OK { "healthy" } else { "degraded" },
            "service": service_names::GATEHOUSE_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        });
        (status, Json(body))
    }
}
