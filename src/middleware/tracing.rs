// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates x-request-id values and creates one span per HTTP request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use axum::body::Body;
use axum::http::{HeaderMap, Request};
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info_span, Span};

/// Correlation header set on every request and echoed on every response
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation data extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Value of `x-request-id`
    pub request_id: String,
}

impl RequestContext {
    /// Read the request id assigned by [`with_request_tracing`]
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_owned();
        Self { request_id }
    }
}

/// Span for one HTTP request, tagged with its request id
pub fn request_span<B>(request: &Request<B>) -> Span {
    let context = RequestContext::from_headers(request.headers());
    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %context.request_id,
    )
}

/// Wrap a router with request id assignment, propagation, and per-request spans
///
/// Incoming `x-request-id` values are kept; missing ones get a UUID.
#[must_use]
pub fn with_request_tracing(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
