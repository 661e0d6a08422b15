// ABOUTME: Core data models for the Gatehouse community platform
// ABOUTME: Re-exports Tenant, Property, Gate, and AdminProfile rows with their descriptors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! # Data Models
//!
//! Rows are plain id-keyed records partitioned by [`TenantId`]. Descriptors
//! are the caller-supplied shapes that the provisioning workflow turns into
//! rows by attaching a tenant id and initial status.

mod admin;
mod gate;
mod property;
mod tenant;

pub use admin::AdminProfile;
pub use gate::{Gate, GateDescriptor, GateType};
pub use property::{Property, PropertyDescriptor, PropertyType};
pub use tenant::{CommunityType, Tenant, TenantId};
