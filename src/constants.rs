// ABOUTME: System-wide constants for the Gatehouse server
// ABOUTME: Re-exports domain constants from gatehouse-core and adds route paths and env names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! # Constants Module
//!
//! Domain constants live in `gatehouse-core`; this module adds the values that
//! only the server needs (HTTP paths and environment variable names).

pub use gatehouse_core::constants::*;

/// HTTP route paths
pub mod routes {
    /// Liveness and database probe
    pub const HEALTH: &str = "/health";
    /// Tenant provisioning
    pub const PLATFORM_TENANTS: &str = "/api/platform/tenants";
    /// Administrator recovery for an existing tenant
    pub const PLATFORM_TENANT_ADMIN: &str = "/api/platform/tenants/:tenant_id/admin";
    /// Subdomain availability probe
    pub const PLATFORM_SUBDOMAIN_AVAILABILITY: &str =
        "/api/platform/subdomains/:candidate/availability";
}

/// Environment variable names read by [`crate::config::environment::ServerConfig`]
pub mod env_vars {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP listen address
    pub const HOST: &str = "HOST";
    /// Relational store connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// HS256 secret for platform tokens
    pub const PLATFORM_JWT_SECRET: &str = "PLATFORM_JWT_SECRET";
    /// Identity service base URL
    pub const IDENTITY_SERVICE_URL: &str = "IDENTITY_SERVICE_URL";
    /// Identity service service-role key
    pub const IDENTITY_SERVICE_KEY: &str = "IDENTITY_SERVICE_KEY";
    /// Email transport selector (`http` or `log`)
    pub const EMAIL_TRANSPORT: &str = "EMAIL_TRANSPORT";
    /// HTTP email API endpoint
    pub const EMAIL_API_URL: &str = "EMAIL_API_URL";
    /// HTTP email API key
    pub const EMAIL_API_KEY: &str = "EMAIL_API_KEY";
    /// Sender address for activation emails
    pub const EMAIL_FROM: &str = "EMAIL_FROM";
    /// Scheme of tenant portal URLs
    pub const PORTAL_SCHEME: &str = "PORTAL_SCHEME";
    /// Parent domain of tenant portals
    pub const PORTAL_BASE_DOMAIN: &str = "PORTAL_BASE_DOMAIN";
    /// Rows per multi-row insert
    pub const RESOURCE_BATCH_SIZE: &str = "RESOURCE_BATCH_SIZE";
    /// Generated one-time password length
    pub const ONE_TIME_PASSWORD_LENGTH: &str = "ONE_TIME_PASSWORD_LENGTH";
    /// Per-request timeout for collaborators
    pub const COLLABORATOR_TIMEOUT_SECS: &str = "COLLABORATOR_TIMEOUT_SECS";
    /// Request body limit
    pub const MAX_REQUEST_BODY_BYTES: &str = "MAX_REQUEST_BODY_BYTES";
}
