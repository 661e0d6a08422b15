// ABOUTME: Tenant-scoped administrator profile model
// ABOUTME: Links an identity-service account to a tenant with the admin head role
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::TenantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile row binding an identity account to a tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Identity-service account id
    pub user_id: Uuid,
    /// Tenant the administrator manages
    pub tenant_id: TenantId,
    /// Role name, `admin_head` for the first administrator
    pub role: String,
    /// Confirmed login email
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Job title within the community
    pub position: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
