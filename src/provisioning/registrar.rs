// ABOUTME: Tenant registrar inserting the tenant row with platform defaults
// ABOUTME: Translates subdomain unique violations into the duplicate-subdomain rejection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::request::ProvisionTenantRequest;
use super::subdomain::SubdomainRejection;
use crate::constants::tenant_defaults;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::{AppError, ErrorCode};
use crate::models::{Tenant, TenantId};
use chrono::Utc;
use tracing::{info, warn};

/// Build the tenant row for a validated request
#[must_use]
pub fn build_tenant(request: &ProvisionTenantRequest, subdomain: &str) -> Tenant {
    let non_blank = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };

    Tenant {
        id: TenantId::new(),
        name: request.name.trim().to_owned(),
        legal_name: non_blank(&request.legal_name),
        subdomain: subdomain.to_owned(),
        community_type: request.community_type,
        year_established: request.year_established,
        max_residences: request.max_residences,
        total_residences: i64::try_from(request.properties.len()).unwrap_or(i64::MAX),
        max_admin_users: request
            .max_admin_users
            .unwrap_or(tenant_defaults::MAX_ADMIN_USERS),
        max_security_users: request
            .max_security_users
            .unwrap_or(tenant_defaults::MAX_SECURITY_USERS),
        storage_quota_gb: request
            .storage_quota_gb
            .unwrap_or(tenant_defaults::STORAGE_QUOTA_GB),
        timezone: non_blank(&request.timezone)
            .unwrap_or_else(|| tenant_defaults::TIMEZONE.to_owned()),
        language: non_blank(&request.language)
            .unwrap_or_else(|| tenant_defaults::LANGUAGE.to_owned()),
        created_at: Utc::now(),
    }
}

/// Why registration failed
#[derive(Debug)]
pub enum RegistrationFailure {
    /// Lost the race for the subdomain
    Duplicate(SubdomainRejection),
    /// Store failure
    Store(AppError),
}

/// Insert the tenant row, classifying failures
///
/// # Errors
/// `Duplicate` when the subdomain unique index rejects the row, `Store` otherwise
pub async fn register_tenant(
    database: &Database,
    tenant: &Tenant,
) -> Result<TenantId, RegistrationFailure> {
    match database.create_tenant(tenant).await {
        Ok(()) => {
            info!(
                tenant_id = %tenant.id,
                subdomain = %tenant.subdomain,
                community_type = %tenant.community_type,
                "Tenant registered"
            );
            Ok(tenant.id)
        }
        Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
            warn!(subdomain = %tenant.subdomain, "Subdomain claimed by a concurrent request");
            Err(RegistrationFailure::Duplicate(SubdomainRejection::Taken(
                tenant.subdomain.clone(),
            )))
        }
        Err(e) => {
            warn!(subdomain = %tenant.subdomain, error = %e, "Tenant registration failed");
            Err(RegistrationFailure::Store(e))
        }
    }
}
