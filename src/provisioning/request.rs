// ABOUTME: Request bodies for tenant provisioning and admin recovery
// ABOUTME: Field-level validation run before any write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use crate::errors::{AppError, AppResult};
use crate::models::{CommunityType, GateDescriptor, PropertyDescriptor};
use chrono::{Datelike, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Earliest accepted founding year
const MIN_YEAR_ESTABLISHED: i32 = 1800;

/// Body of `POST /api/platform/tenants`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionTenantRequest {
    /// Community display name
    pub name: String,
    /// Registered legal name
    #[serde(default)]
    pub legal_name: Option<String>,
    /// Requested subdomain, normalized during validation
    pub subdomain: String,
    /// Community classification
    pub community_type: CommunityType,
    /// Founding year
    #[serde(default)]
    pub year_established: Option<i32>,
    /// IANA timezone, defaults to UTC
    #[serde(default)]
    pub timezone: Option<String>,
    /// Interface language, defaults to `en`
    #[serde(default)]
    pub language: Option<String>,
    /// Residence capacity
    pub max_residences: i64,
    /// Administrator seat limit
    #[serde(default)]
    pub max_admin_users: Option<i64>,
    /// Security staff seat limit
    #[serde(default)]
    pub max_security_users: Option<i64>,
    /// Storage quota in gigabytes
    #[serde(default)]
    pub storage_quota_gb: Option<i64>,
    /// Properties to import
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    /// Gates to configure
    #[serde(default)]
    pub gates: Vec<GateDescriptor>,
    /// Admin head login email
    pub admin_email: String,
    /// Admin head given name
    pub admin_first_name: String,
    /// Admin head family name
    pub admin_last_name: String,
    /// Admin head phone
    #[serde(default)]
    pub admin_phone: Option<String>,
    /// Admin head job title
    #[serde(default)]
    pub admin_position: Option<String>,
}

/// Body of `POST /api/platform/tenants/{tenant_id}/admin`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecoveryRequest {
    /// Admin head login email
    pub admin_email: String,
    /// Admin head given name
    pub admin_first_name: String,
    /// Admin head family name
    pub admin_last_name: String,
    /// Admin head phone
    #[serde(default)]
    pub admin_phone: Option<String>,
    /// Admin head job title
    #[serde(default)]
    pub admin_position: Option<String>,
}

/// Administrator details shared by both requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContact {
    /// Login email, trimmed
    pub email: String,
    /// Given name, trimmed
    pub first_name: String,
    /// Family name, trimmed
    pub last_name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Job title
    pub position: Option<String>,
}

impl ProvisionTenantRequest {
    /// Check every field except subdomain availability
    ///
    /// # Errors
    /// Returns the first invalid field as an `InvalidInput`, `MissingRequiredField`
    /// or `ValueOutOfRange` error
    pub fn validate(&self) -> AppResult<()> {
        require_text("name", &self.name)?;
        validate_admin_fields(
            &self.admin_email,
            &self.admin_first_name,
            &self.admin_last_name,
        )?;

        if self.max_residences < 1 {
            return Err(AppError::out_of_range("max_residences must be at least 1"));
        }
        if let Some(seats) = self.max_admin_users {
            if seats < 1 {
                return Err(AppError::out_of_range("max_admin_users must be at least 1"));
            }
        }
        non_negative("max_security_users", self.max_security_users)?;
        non_negative("storage_quota_gb", self.storage_quota_gb)?;

        if let Some(year) = self.year_established {
            let current_year = Utc::now().year();
            if !(MIN_YEAR_ESTABLISHED..=current_year).contains(&year) {
                return Err(AppError::out_of_range(format!(
                    "year_established must be between {MIN_YEAR_ESTABLISHED} and {current_year}"
                )));
            }
        }

        for (index, property) in self.properties.iter().enumerate() {
            validate_property(index, property)?;
        }
        for (index, gate) in self.gates.iter().enumerate() {
            validate_gate(index, gate)?;
        }

        Ok(())
    }

    /// Administrator details
    #[must_use]
    pub fn admin_contact(&self) -> AdminContact {
        AdminContact::new(
            &self.admin_email,
            &self.admin_first_name,
            &self.admin_last_name,
            self.admin_phone.as_deref(),
            self.admin_position.as_deref(),
        )
    }
}

impl AdminRecoveryRequest {
    /// Check the administrator fields
    ///
    /// # Errors
    /// Returns the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        validate_admin_fields(
            &self.admin_email,
            &self.admin_first_name,
            &self.admin_last_name,
        )
    }

    /// Administrator details
    #[must_use]
    pub fn admin_contact(&self) -> AdminContact {
        AdminContact::new(
            &self.admin_email,
            &self.admin_first_name,
            &self.admin_last_name,
            self.admin_phone.as_deref(),
            self.admin_position.as_deref(),
        )
    }
}

impl AdminContact {
    fn new(
        email: &str,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        position: Option<&str>,
    ) -> Self {
        Self {
            email: email.trim().to_owned(),
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
            phone: optional_text(phone),
            position: optional_text(position),
        }
    }

    /// Full name for greetings
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(())
}

fn non_negative(field: &str, value: Option<i64>) -> AppResult<()> {
    match value {
        Some(v) if v < 0 => Err(AppError::out_of_range(format!(
            "{field} cannot be negative"
        ))),
        _ => Ok(()),
    }
}

fn validate_admin_fields(email: &str, first_name: &str, last_name: &str) -> AppResult<()> {
    require_text("admin_email", email)?;
    let well_formed = EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email.trim()));
    if !well_formed {
        return Err(AppError::invalid_input(
            "admin_email is not a valid email address",
        ));
    }
    require_text("admin_first_name", first_name)?;
    require_text("admin_last_name", last_name)
}

fn validate_property(index: usize, property: &PropertyDescriptor) -> AppResult<()> {
    require_text(&format!("properties[{index}].address"), &property.address)?;

    let sizes = [
        ("property_size_sqm", property.property_size_sqm),
        ("lot_size_sqm", property.lot_size_sqm),
    ];
    for (field, value) in sizes {
        if value.is_some_and(|v| v < 0.0 || !v.is_finite()) {
            return Err(AppError::out_of_range(format!(
                "properties[{index}].{field} cannot be negative"
            )));
        }
    }

    let counts = [
        ("bedrooms", property.bedrooms),
        ("bathrooms", property.bathrooms),
        ("parking_slots", property.parking_slots),
    ];
    for (field, value) in counts {
        if value.is_some_and(|v| v < 0) {
            return Err(AppError::out_of_range(format!(
                "properties[{index}].{field} cannot be negative"
            )));
        }
    }
    Ok(())
}

fn validate_gate(index: usize, gate: &GateDescriptor) -> AppResult<()> {
    require_text(&format!("gates[{index}].name"), &gate.name)?;

    let hours = [
        ("operating_hours_start", gate.operating_hours_start.as_deref()),
        ("operating_hours_end", gate.operating_hours_end.as_deref()),
    ];
    for (field, value) in hours {
        if let Some(time) = value {
            if !is_time_of_day(time) {
                return Err(AppError::invalid_input(format!(
                    "gates[{index}].{field} must be HH:MM or HH:MM:SS"
                )));
            }
        }
    }

    if gate.gps_lat.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
        return Err(AppError::out_of_range(format!(
            "gates[{index}].gps_lat must be between -90 and 90"
        )));
    }
    if gate
        .gps_lng
        .is_some_and(|lng| !(-180.0..=180.0).contains(&lng))
    {
        return Err(AppError::out_of_range(format!(
            "gates[{index}].gps_lng must be between -180 and 180"
        )));
    }
    Ok(())
}

fn is_time_of_day(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
}
