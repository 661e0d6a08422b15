// ABOUTME: Route module organization for the Gatehouse platform HTTP API
// ABOUTME: Provisioning, admin recovery, subdomain availability, and health endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Route module for the Gatehouse server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the provisioning layer.

/// Health check and system status routes
pub mod health;
/// Tenant provisioning routes for platform operators
pub mod provisioning;

/// Health check route handlers
pub use health::HealthRoutes;
/// Provisioning route handlers
pub use provisioning::{ProvisioningRoutes, SubdomainAvailability};
