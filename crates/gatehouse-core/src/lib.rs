// ABOUTME: Core types and constants for the Gatehouse community management platform
// ABOUTME: Foundation crate with error handling, domain models, and provisioning constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

#![deny(unsafe_code)]

//! # Gatehouse Core
//!
//! Foundation crate providing shared types and constants for the Gatehouse
//! back office. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Tenant defaults, subdomain rules, and role names
//! - **models**: Tenant, property, gate, and admin profile rows

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Tenant, Property, Gate, `AdminProfile`)
pub mod models;
