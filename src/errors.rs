// ABOUTME: Re-exports the unified error types from gatehouse-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable across the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! # Unified Error Handling System
//!
//! Error codes, `AppError`, and the HTTP error body live in `gatehouse-core`
//! so they can be shared by every workspace crate. Workflow-level failures are
//! modelled separately by [`crate::provisioning::ProvisioningError`].

pub use gatehouse_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
