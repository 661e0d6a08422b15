// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Configuration module for the Gatehouse server
//!
//! Configuration is environment-only; there is no config file.

/// Environment and server configuration
pub mod environment;
