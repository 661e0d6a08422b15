// ABOUTME: Tenant (community) model and identifiers
// ABOUTME: TenantId newtype, CommunityType classification, and the persisted Tenant row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe wrapper for tenant identifiers
///
/// Provides compile-time distinction between tenant IDs and other UUIDs
/// such as identity-service account ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    /// Create a new random `TenantId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TenantId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Kind of residential community a tenant operates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunityType {
    /// Homeowners association
    #[serde(rename = "HOA")]
    Hoa,
    /// Condominium corporation
    #[serde(rename = "Condo")]
    Condo,
    /// Gated village
    #[serde(rename = "Gated Village")]
    GatedVillage,
    /// Open subdivision
    #[serde(rename = "Subdivision")]
    Subdivision,
}

impl CommunityType {
    /// Stored and wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hoa => "HOA",
            Self::Condo => "Condo",
            Self::GatedVillage => "Gated Village",
            Self::Subdivision => "Subdivision",
        }
    }
}

impl fmt::Display for CommunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommunityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HOA" => Ok(Self::Hoa),
            "Condo" => Ok(Self::Condo),
            "Gated Village" => Ok(Self::GatedVillage),
            "Subdivision" => Ok(Self::Subdivision),
            other => Err(format!("unknown community type: {other}")),
        }
    }
}

/// One customer community in the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    /// Generated identifier
    pub id: TenantId,
    /// Display name
    pub name: String,
    /// Registered legal name
    pub legal_name: Option<String>,
    /// Normalized DNS label routing to this tenant's portal
    pub subdomain: String,
    /// Community classification
    pub community_type: CommunityType,
    /// Year the community was founded
    pub year_established: Option<i32>,
    /// Residence capacity
    pub max_residences: i64,
    /// Residences registered at creation time
    pub total_residences: i64,
    /// Administrator seat limit
    pub max_admin_users: i64,
    /// Security staff seat limit
    pub max_security_users: i64,
    /// Storage quota in gigabytes
    pub storage_quota_gb: i64,
    /// IANA timezone name
    pub timezone: String,
    /// Interface language code
    pub language: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_community_type_wire_names() {
        let parsed: CommunityType = serde_json::from_str("\"Gated Village\"").unwrap();
        assert_eq!(parsed, CommunityType::GatedVillage);
        assert_eq!(serde_json::to_string(&CommunityType::Hoa).unwrap(), "\"HOA\"");
        assert!(serde_json::from_str::<CommunityType>("\"hoa\"").is_err());
    }

    #[test]
    fn test_community_type_storage_round_trip() {
        for kind in [
            CommunityType::Hoa,
            CommunityType::Condo,
            CommunityType::GatedVillage,
            CommunityType::Subdivision,
        ] {
            assert_eq!(kind.as_str().parse::<CommunityType>(), Ok(kind));
        }
    }
}
