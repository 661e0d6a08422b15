// ABOUTME: Constants grouped by domain for tenant provisioning
// ABOUTME: Tenant defaults, subdomain rules, role names, row statuses, and service limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Service identifiers used in logs, tokens, and health output
pub mod service_names {
    /// Server binary and tracing service name
    pub const GATEHOUSE_SERVER: &str = "gatehouse-server";
    /// Issuer of platform administration tokens
    pub const PLATFORM_ISSUER: &str = "gatehouse-platform";
    /// Audience of platform administration tokens
    pub const PLATFORM_AUDIENCE: &str = "gatehouse-platform-api";
    /// Identity service name used in error messages
    pub const IDENTITY_SERVICE: &str = "identity-service";
    /// Email transport name used in error messages
    pub const EMAIL_SERVICE: &str = "email-transport";
}

/// Defaults applied to a new tenant when the request omits them
pub mod tenant_defaults {
    /// Maximum number of administrator accounts
    pub const MAX_ADMIN_USERS: i64 = 10;
    /// Maximum number of security staff accounts
    pub const MAX_SECURITY_USERS: i64 = 20;
    /// Storage quota in gigabytes
    pub const STORAGE_QUOTA_GB: i64 = 10;
    /// IANA timezone
    pub const TIMEZONE: &str = "UTC";
    /// Interface language
    pub const LANGUAGE: &str = "en";
}

/// Subdomain label rules
pub mod subdomain {
    /// Minimum label length
    pub const MIN_LENGTH: usize = 3;
    /// Maximum label length (DNS label limit)
    pub const MAX_LENGTH: usize = 63;
    /// DNS label pattern applied after normalization
    pub const LABEL_PATTERN: &str = r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$";
    /// Labels reserved for platform use
    pub const RESERVED: &[&str] = &[
        "www",
        "api",
        "admin",
        "app",
        "platform",
        "dashboard",
        "portal",
        "support",
        "help",
        "docs",
        "blog",
        "mail",
        "email",
        "status",
        "staging",
        "test",
        "dev",
        "demo",
        "sandbox",
        "localhost",
    ];
}

/// Role names carried in tokens and identity metadata
pub mod roles {
    /// Platform operator allowed to provision tenants
    pub const SUPER_ADMIN: &str = "super_admin";
    /// First privileged administrator of a tenant
    pub const ADMIN_HEAD: &str = "admin_head";
}

/// Initial row statuses
pub mod statuses {
    /// New properties start unoccupied
    pub const PROPERTY_VACANT: &str = "vacant";
    /// New gates start in service
    pub const GATE_ACTIVE: &str = "active";
}

/// Numeric limits
pub mod limits {
    /// Rows per multi-row insert
    pub const DEFAULT_RESOURCE_BATCH_SIZE: usize = 500;
    /// Bind parameters `SQLite` accepts in one statement
    pub const SQLITE_MAX_BIND_PARAMS: usize = 32_766;
    /// Bind parameters `PostgreSQL` accepts in one statement
    pub const POSTGRES_MAX_BIND_PARAMS: usize = 65_535;
    /// Lower bound for one-time password length
    pub const MIN_ONE_TIME_PASSWORD_LENGTH: usize = 16;
    /// Per-request timeout for identity and email collaborators
    pub const COLLABORATOR_TIMEOUT_SECS: u64 = 30;
    /// Upper bound on request bodies (5 MiB)
    pub const MAX_REQUEST_BODY_BYTES: usize = 5 * 1024 * 1024;
    /// Minimum length of the platform token signing secret
    pub const MIN_JWT_SECRET_BYTES: usize = 32;
    /// Default platform token lifetime
    pub const PLATFORM_TOKEN_HOURS: i64 = 8;
}
