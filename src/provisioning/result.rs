// ABOUTME: Response shape returned for every provisioning outcome
// ABOUTME: ProvisioningResult with optional fields omitted from JSON when absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use crate::errors::ErrorCode;
use crate::models::TenantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a provisioning or admin-recovery call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningResult {
    /// Whether the tenant is usable (an administrator exists)
    pub success: bool,
    /// Tenant that was created or targeted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    /// Normalized subdomain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    /// Identity-service id of the admin head
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_user_id: Option<Uuid>,
    /// Property rows that landed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties_created: Option<u64>,
    /// Gate rows that landed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gates_created: Option<u64>,
    /// Whether the activation email was accepted by the transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_email_sent: Option<bool>,
    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable failure code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl ProvisioningResult {
    /// Failure result with no durable state
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
