// ABOUTME: Property (residential unit) model and bulk-import descriptor
// ABOUTME: PropertyType classification, PropertyDescriptor input, and the persisted Property row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::TenantId;
use crate::constants::statuses;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Physical form of a residential unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Detached house
    SingleFamily,
    /// Attached row house
    Townhouse,
    /// Condominium unit
    Condo,
    /// Vacant lot
    LotOnly,
}

impl PropertyType {
    /// Stored representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingleFamily => "single_family",
            Self::Townhouse => "townhouse",
            Self::Condo => "condo",
            Self::LotOnly => "lot_only",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied description of one property to import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Street address or block/lot label
    pub address: String,
    /// Development phase
    #[serde(default)]
    pub phase: Option<String>,
    /// Block label
    #[serde(default)]
    pub block: Option<String>,
    /// Lot label
    #[serde(default)]
    pub lot: Option<String>,
    /// Unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Physical form
    pub property_type: PropertyType,
    /// Floor area in square meters
    #[serde(default)]
    pub property_size_sqm: Option<f64>,
    /// Lot area in square meters
    #[serde(default)]
    pub lot_size_sqm: Option<f64>,
    /// Number of bedrooms
    #[serde(default)]
    pub bedrooms: Option<i32>,
    /// Number of bathrooms
    #[serde(default)]
    pub bathrooms: Option<i32>,
    /// Number of parking slots
    #[serde(default)]
    pub parking_slots: Option<i32>,
}

/// Persisted property row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Generated identifier
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Street address or block/lot label
    pub address: String,
    /// Development phase
    pub phase: Option<String>,
    /// Block label
    pub block: Option<String>,
    /// Lot label
    pub lot: Option<String>,
    /// Unit label
    pub unit: Option<String>,
    /// Physical form
    pub property_type: PropertyType,
    /// Floor area in square meters
    pub property_size_sqm: Option<f64>,
    /// Lot area in square meters
    pub lot_size_sqm: Option<f64>,
    /// Number of bedrooms
    pub bedrooms: Option<i32>,
    /// Number of bathrooms
    pub bathrooms: Option<i32>,
    /// Number of parking slots
    pub parking_slots: Option<i32>,
    /// Occupancy status
    pub status: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Build a new vacant property row for `tenant_id`
    #[must_use]
    pub fn from_descriptor(tenant_id: TenantId, descriptor: PropertyDescriptor) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            address: descriptor.address,
            phase: descriptor.phase,
            block: descriptor.block,
            lot: descriptor.lot,
            unit: descriptor.unit,
            property_type: descriptor.property_type,
            property_size_sqm: descriptor.property_size_sqm,
            lot_size_sqm: descriptor.lot_size_sqm,
            bedrooms: descriptor.bedrooms,
            bathrooms: descriptor.bathrooms,
            parking_slots: descriptor.parking_slots,
            status: statuses::PROPERTY_VACANT.to_owned(),
            created_at: Utc::now(),
        }
    }
}
