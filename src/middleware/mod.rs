// ABOUTME: HTTP middleware for request tracing and correlation
// ABOUTME: Provides request ID generation and span creation for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

pub mod tracing;

// Request tracing and correlation
pub use tracing::{request_span, with_request_tracing, RequestContext, REQUEST_ID_HEADER};
