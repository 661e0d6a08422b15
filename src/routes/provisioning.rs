// ABOUTME: Platform console routes for tenant provisioning and admin recovery
// ABOUTME: Authenticates the super administrator before delegating to the orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Tenant provisioning routes
//!
//! Every handler authenticates the `Authorization: Bearer` platform token
//! before reading the body, so unauthenticated calls never reach validation
//! or the store.

use crate::admin::{authorize_super_admin, SuperAdmin};
use crate::constants::routes;
use crate::errors::{AppError, AppResult};
use crate::models::TenantId;
use crate::provisioning::subdomain::{self, SubdomainRejection};
use crate::provisioning::{
    AdminRecoveryRequest, ProvisionTenantRequest, ProvisioningError, ProvisioningResult,
};
use crate::server::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response of the subdomain availability probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainAvailability {
    /// Candidate after normalization
    pub subdomain: String,
    /// Whether provisioning would accept it right now
    pub available: bool,
    /// Rejection reason when unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Tenant provisioning routes
pub struct ProvisioningRoutes;

impl ProvisioningRoutes {
    /// Create all provisioning routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::PLATFORM_TENANTS, post(Self::handle_provision_tenant))
            .route(routes::PLATFORM_TENANT_ADMIN, post(Self::handle_retry_admin))
            .route(
                routes::PLATFORM_SUBDOMAIN_AVAILABILITY,
                get(Self::handle_subdomain_availability),
            )
            .with_state(resources)
    }

    fn authenticate(
        headers: &HeaderMap,
        resources: &ServerResources,
    ) -> Result<SuperAdmin, ProvisioningError> {
        authorize_super_admin(headers, &resources.jwt_manager).map_err(ProvisioningError::from)
    }

    fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ProvisioningError> {
        payload.map(|Json(body)| body).map_err(|rejection| {
            ProvisioningError::Validation(AppError::invalid_input(rejection.body_text()))
        })
    }

    /// Handle `POST /api/platform/tenants`
    async fn handle_provision_tenant(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<ProvisionTenantRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<ProvisioningResult>), ProvisioningError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let request = Self::body(payload)?;

        let result = resources.orchestrator.provision(&caller, request).await?;
        Ok((StatusCode::CREATED, Json(result)))
    }

    /// Handle `POST /api/platform/tenants/{tenant_id}/admin`
    async fn handle_retry_admin(
        State(resources): State<Arc<ServerResources>>,
        Path(tenant_id): Path<String>,
        headers: HeaderMap,
        payload: Result<Json<AdminRecoveryRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<ProvisioningResult>), ProvisioningError> {
        let caller = Self::authenticate(&headers, &resources)?;
        let tenant_id: TenantId = tenant_id.parse().map_err(|_| {
            ProvisioningError::Validation(AppError::invalid_input(format!(
                "Invalid tenant id: {tenant_id}"
            )))
        })?;
        let request = Self::body(payload)?;

        let result = resources
            .orchestrator
            .retry_admin(&caller, tenant_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(result)))
    }

    /// Handle `GET /api/platform/subdomains/{candidate}/availability`
    async fn handle_subdomain_availability(
        State(resources): State<Arc<ServerResources>>,
        Path(candidate): Path<String>,
        headers: HeaderMap,
    ) -> AppResult<Json<SubdomainAvailability>> {
        authorize_super_admin(&headers, &resources.jwt_manager)?;

        let verdict = subdomain::validate(&resources.database, &candidate).await?;
        let availability = match verdict {
            Ok(normalized) => SubdomainAvailability {
                subdomain: normalized,
                available: true,
                reason: None,
            },
            Err(rejection) => SubdomainAvailability {
                subdomain: rejected_label(&candidate, &rejection),
                available: false,
                reason: Some(rejection.to_string()),
            },
        };
        Ok(Json(availability))
    }
}

fn rejected_label(candidate: &str, rejection: &SubdomainRejection) -> String {
    match rejection {
        SubdomainRejection::Reserved(label) | SubdomainRejection::Taken(label) => label.clone(),
        _ => candidate.trim().to_lowercase(),
    }
}
