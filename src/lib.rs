// ABOUTME: Main library entry point for the Gatehouse tenant provisioning service
// ABOUTME: Wires the provisioning workflow, its collaborators, and the platform HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

#![deny(unsafe_code)]

//! # Gatehouse Server
//!
//! Back-office service for a multi-tenant community management platform.
//! The service provisions new communities ("tenants") together with their
//! properties, access gates, and first administrator, then sends that
//! administrator an activation email carrying a one-time password.
//!
//! ## Architecture
//!
//! - **provisioning**: the multi-step workflow and its per-step components
//! - **`database_plugins`**: relational store abstraction (`SQLite`, `PostgreSQL`)
//! - **identity**: external identity-service client and one-time passwords
//! - **notifications**: activation email rendering and transports
//! - **admin**: platform token issuance and super-admin verification
//! - **routes**: Axum handlers for the platform console API
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gatehouse_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Gatehouse configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Platform administrator tokens and super-admin capability
pub mod admin;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// Relational store abstraction and backends
pub mod database_plugins;

/// Unified error handling re-exported from `gatehouse-core`
pub mod errors;

/// External identity service client and credential generation
pub mod identity;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (request ids, tracing spans)
pub mod middleware;

/// Core data models re-exported from `gatehouse-core`
pub mod models {
    pub use gatehouse_core::models::*;
}

/// Activation email rendering and delivery
pub mod notifications;

/// Tenant provisioning workflow
pub mod provisioning;

/// HTTP route handlers
pub mod routes;

/// Server resources, router assembly, and startup
pub mod server;
