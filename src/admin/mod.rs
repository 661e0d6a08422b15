// ABOUTME: Platform administrator authentication module organization and exports
// ABOUTME: Token issuance plus the SuperAdmin capability required by provisioning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Platform Administrator Authentication

/// Super-admin capability and header verification
pub mod auth;
/// JWT token generation and validation for platform auth
pub mod jwt;

pub use auth::{authorize_super_admin, verify_super_admin, SuperAdmin};
pub use jwt::{PlatformJwtManager, PlatformTokenClaims};
