// ABOUTME: Access gate model and configuration descriptor
// ABOUTME: GateType classification, GateDescriptor input, and the persisted Gate row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::TenantId;
use crate::constants::statuses;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role of a gate in the community perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateType {
    /// Main entrance
    Primary,
    /// Secondary entrance
    Secondary,
    /// Deliveries and contractors
    Service,
    /// Emergency vehicles only
    Emergency,
}

impl GateType {
    /// Stored representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Service => "service",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied description of one gate to configure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDescriptor {
    /// Display name
    pub name: String,
    /// Gate role
    pub gate_type: GateType,
    /// Opening time, `HH:MM` or `HH:MM:SS`
    #[serde(default)]
    pub operating_hours_start: Option<String>,
    /// Closing time, `HH:MM` or `HH:MM:SS`
    #[serde(default)]
    pub operating_hours_end: Option<String>,
    /// Latitude in degrees
    #[serde(default)]
    pub gps_lat: Option<f64>,
    /// Longitude in degrees
    #[serde(default)]
    pub gps_lng: Option<f64>,
    /// Serial number of the installed RFID reader
    #[serde(default)]
    pub rfid_reader_serial: Option<String>,
}

/// Persisted gate row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Generated identifier
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: TenantId,
    /// Display name
    pub name: String,
    /// Gate role
    pub gate_type: GateType,
    /// Opening time
    pub operating_hours_start: Option<String>,
    /// Closing time
    pub operating_hours_end: Option<String>,
    /// Latitude in degrees
    pub gps_lat: Option<f64>,
    /// Longitude in degrees
    pub gps_lng: Option<f64>,
    /// Serial number of the installed RFID reader
    pub rfid_reader_serial: Option<String>,
    /// Operational status
    pub status: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Gate {
    /// Build a new active gate row for `tenant_id`
    #[must_use]
    pub fn from_descriptor(tenant_id: TenantId, descriptor: GateDescriptor) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: descriptor.name,
            gate_type: descriptor.gate_type,
            operating_hours_start: descriptor.operating_hours_start,
            operating_hours_end: descriptor.operating_hours_end,
            gps_lat: descriptor.gps_lat,
            gps_lng: descriptor.gps_lng,
            rfid_reader_serial: descriptor.rfid_reader_serial,
            status: statuses::GATE_ACTIVE.to_owned(),
            created_at: Utc::now(),
        }
    }
}
