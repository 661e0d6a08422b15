// ABOUTME: Workflow error taxonomy for tenant provisioning and admin recovery
// ABOUTME: Maps each exit path to an HTTP status and a ProvisioningResult body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::outcome::ProvisioningStep;
use super::result::ProvisioningResult;
use crate::errors::{AppError, ErrorCode};
use crate::models::TenantId;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Why a provisioning call did not produce a usable tenant
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// Caller input rejected before any write
    #[error("{}", .0.message)]
    Validation(AppError),

    /// Caller is not an authenticated super administrator
    #[error("{}", .0.message)]
    Unauthorized(AppError),

    /// A fatal step failed before anything durable was written
    #[error("{step} failed: {source}. No records were created")]
    Infrastructure {
        /// Step that failed
        step: ProvisioningStep,
        /// Underlying failure
        source: AppError,
    },

    /// The tenant exists but no administrator could be created for it
    #[error(
        "Tenant {tenant_id} ({subdomain}) was created but its admin account could not be provisioned: \
         {reason}. Retry admin creation for this tenant instead of resubmitting the request"
    )]
    OrphanedTenant {
        /// Tenant left without an administrator
        tenant_id: TenantId,
        /// Its subdomain
        subdomain: String,
        /// Properties that landed before the failure
        properties_created: Option<u64>,
        /// Gates that landed before the failure
        gates_created: Option<u64>,
        /// Identity-step failure
        reason: String,
    },

    /// Admin recovery could not read the tenant or its admin head
    #[error(
        "Admin recovery for tenant {tenant_id} could not read its current state: {source}. \
         The tenant was not changed; retry the recovery request"
    )]
    RecoveryLookup {
        /// Tenant being recovered
        tenant_id: TenantId,
        /// Underlying failure
        source: AppError,
    },

    /// Admin recovery targeted an unknown tenant
    #[error("Tenant {0} not found")]
    TenantNotFound(TenantId),

    /// Admin recovery targeted a tenant that already has an admin head
    #[error("Tenant {0} already has an admin head")]
    AdminAlreadyExists(TenantId),
}

impl ProvisioningError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(e) => {
                if e.code == ErrorCode::PermissionDenied {
                    StatusCode::FORBIDDEN
                } else {
                    StatusCode::UNAUTHORIZED
                }
            }
            Self::Infrastructure { .. }
            | Self::RecoveryLookup { .. }
            | Self::OrphanedTenant { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TenantNotFound(_) => StatusCode::NOT_FOUND,
            Self::AdminAlreadyExists(_) => StatusCode::CONFLICT,
        }
    }

    /// Machine-readable code reported alongside the message
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) | Self::Unauthorized(e) => e.code,
            Self::Infrastructure { source, .. } | Self::RecoveryLookup { source, .. } => {
                source.code
            }
            Self::OrphanedTenant { .. } => ErrorCode::TenantOrphaned,
            Self::TenantNotFound(_) => ErrorCode::ResourceNotFound,
            Self::AdminAlreadyExists(_) => ErrorCode::ResourceAlreadyExists,
        }
    }

    /// Response body for this error
    #[must_use]
    pub fn to_result(&self) -> ProvisioningResult {
        let result = match self {
            Self::OrphanedTenant {
                tenant_id,
                subdomain,
                properties_created,
                gates_created,
                ..
            } => ProvisioningResult {
                success: false,
                tenant_id: Some(*tenant_id),
                subdomain: Some(subdomain.clone()),
                properties_created: *properties_created,
                gates_created: *gates_created,
                error: Some(self.to_string()),
                ..ProvisioningResult::default()
            },
            Self::TenantNotFound(tenant_id)
            | Self::AdminAlreadyExists(tenant_id)
            | Self::RecoveryLookup { tenant_id, .. } => ProvisioningResult {
                tenant_id: Some(*tenant_id),
                ..ProvisioningResult::failure(self.to_string())
            },
            _ => ProvisioningResult::failure(self.to_string()),
        };
        ProvisioningResult {
            error_code: Some(self.code()),
            ..result
        }
    }
}

impl From<AppError> for ProvisioningError {
    fn from(error: AppError) -> Self {
        match error.code {
            ErrorCode::AuthRequired
            | ErrorCode::AuthInvalid
            | ErrorCode::AuthExpired
            | ErrorCode::PermissionDenied => Self::Unauthorized(error),
            _ => Self::Validation(error),
        }
    }
}

impl IntoResponse for ProvisioningError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Provisioning failed");
        }
        (status, Json(self.to_result())).into_response()
    }
}
