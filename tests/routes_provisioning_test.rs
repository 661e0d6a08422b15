// ABOUTME: HTTP-level tests for the platform provisioning API
// ABOUTME: Status codes, authentication ordering, result bodies, availability probe, and health
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;
mod helpers;

use axum::Router;
use common::{
    create_harness, create_harness_with, property_bodies, provision_body, server_resources,
    super_admin_token, test_settings, token_for_role, MockIdentityProvider,
    RecordingEmailTransport, TestHarness,
};
use gatehouse_server::{
    constants::roles, errors::ErrorCode, provisioning::ProvisioningResult,
    routes::SubdomainAvailability, server,
};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

const TENANTS: &str = "/api/platform/tenants";

fn app(harness: &TestHarness) -> Router {
    server::router(server_resources(harness))
}

fn admin_path(tenant_id: &str) -> String {
    format!("/api/platform/tenants/{tenant_id}/admin")
}

fn recovery_body() -> Value {
    json!({
        "admin_email": "second.try@oakridge.example",
        "admin_first_name": "Marco",
        "admin_last_name": "Santos"
    })
}

#[tokio::test]
async fn test_provision_returns_created() {
    let harness = create_harness().await;
    let mut body = provision_body("oak-ridge");
    body["properties"] = property_bodies(3);

    let response = AxumTestRequest::post(TENANTS)
        .bearer(&super_admin_token())
        .json(&body)
        .send(app(&harness))
        .await;

    assert_eq!(response.status(), 201);
    let result: ProvisioningResult = response.json();
    assert!(result.success);
    assert_eq!(result.subdomain.as_deref(), Some("oak-ridge"));
    assert_eq!(result.properties_created, Some(3));
    assert_eq!(result.gates_created, Some(0));
    assert_eq!(result.activation_email_sent, Some(true));
}

#[tokio::test]
async fn test_missing_or_malformed_credentials_are_unauthorized() {
    let harness = create_harness().await;

    let missing = AxumTestRequest::post(TENANTS)
        .json(&provision_body("oak-ridge"))
        .send(app(&harness))
        .await;
    assert_eq!(missing.status(), 401);

    let basic = AxumTestRequest::post(TENANTS)
        .header("authorization", "Basic b3BzOnNlY3JldA==")
        .json(&provision_body("oak-ridge"))
        .send(app(&harness))
        .await;
    assert_eq!(basic.status(), 401);

    let forged = AxumTestRequest::post(TENANTS)
        .bearer("eyJhbGciOiJIUzI1NiJ9.e30.invalid")
        .json(&provision_body("oak-ridge"))
        .send(app(&harness))
        .await;
    assert_eq!(forged.status(), 401);

    assert_eq!(common::count_rows(&harness.database, "tenants").await, 0);
}

#[tokio::test]
async fn test_authentication_precedes_body_parsing() {
    let harness = create_harness().await;

    let response = AxumTestRequest::post(TENANTS)
        .raw_json("{not json")
        .send(app(&harness))
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_non_super_admin_role_is_forbidden() {
    let harness = create_harness().await;

    let response = AxumTestRequest::post(TENANTS)
        .bearer(&token_for_role(roles::ADMIN_HEAD))
        .json(&provision_body("oak-ridge"))
        .send(app(&harness))
        .await;

    assert_eq!(response.status(), 403);
    assert!(harness.identity.accounts().is_empty());
}

#[tokio::test]
async fn test_bad_requests_return_failure_result() {
    let harness = create_harness().await;

    let malformed = AxumTestRequest::post(TENANTS)
        .bearer(&super_admin_token())
        .raw_json("{not json")
        .send(app(&harness))
        .await;
    assert_eq!(malformed.status(), 400);
    let result: ProvisioningResult = malformed.json();
    assert!(!result.success);
    assert!(result.error.is_some());

    let reserved = AxumTestRequest::post(TENANTS)
        .bearer(&super_admin_token())
        .json(&provision_body("admin"))
        .send(app(&harness))
        .await;
    assert_eq!(reserved.status(), 400);
    let result: ProvisioningResult = reserved.json();
    assert!(!result.success);
    assert!(result.tenant_id.is_none());
    assert!(result.error.unwrap().contains("reserved"));

    assert_eq!(common::count_rows(&harness.database, "tenants").await, 0);
}

#[tokio::test]
async fn test_duplicate_subdomain_is_bad_request() {
    let harness = create_harness().await;
    let first = AxumTestRequest::post(TENANTS)
        .bearer(&super_admin_token())
        .json(&provision_body("oak-ridge"))
        .send(app(&harness))
        .await;
    assert_eq!(first.status(), 201);

    let second = AxumTestRequest::post(TENANTS)
        .bearer(&super_admin_token())
        .json(&provision_body("Oak-Ridge"))
        .send(app(&harness))
        .await;
    assert_eq!(second.status(), 400);
    let result: ProvisioningResult = second.json();
    assert!(result.error.unwrap().contains("already taken"));
}

#[tokio::test]
async fn test_orphaned_tenant_is_reported_then_recovered() {
    let harness = create_harness_with(
        MockIdentityProvider::failing(),
        RecordingEmailTransport::new(),
        test_settings(),
    )
    .await;

    let orphan = AxumTestRequest::post(TENANTS)
        .bearer(&super_admin_token())
        .json(&provision_body("oak-ridge"))
        .send(app(&harness))
        .await;
    assert_eq!(orphan.status(), 500);
    let result: ProvisioningResult = orphan.json();
    assert!(!result.success);
    assert_eq!(result.subdomain.as_deref(), Some("oak-ridge"));
    assert_eq!(result.error_code, Some(ErrorCode::TenantOrphaned));
    let tenant_id = result.tenant_id.expect("orphan result names the tenant");
    assert!(result.error.unwrap().contains(&tenant_id.to_string()));
    assert!(harness.email.sent().is_empty());

    harness.identity.set_failing(false);
    let recovered = AxumTestRequest::post(&admin_path(&tenant_id.to_string()))
        .bearer(&super_admin_token())
        .json(&recovery_body())
        .send(app(&harness))
        .await;
    assert_eq!(recovered.status(), 201);
    let result: ProvisioningResult = recovered.json();
    assert!(result.success);
    assert_eq!(result.tenant_id, Some(tenant_id));
    assert_eq!(harness.email.sent().len(), 1);
    assert_eq!(harness.email.sent()[0].to, "second.try@oakridge.example");

    let again = AxumTestRequest::post(&admin_path(&tenant_id.to_string()))
        .bearer(&super_admin_token())
        .json(&recovery_body())
        .send(app(&harness))
        .await;
    assert_eq!(again.status(), 409);
    let result: ProvisioningResult = again.json();
    assert_eq!(result.error_code, Some(ErrorCode::ResourceAlreadyExists));
}

#[tokio::test]
async fn test_admin_recovery_rejects_unknown_or_invalid_tenant() {
    let harness = create_harness().await;

    let unknown = AxumTestRequest::post(&admin_path(&uuid::Uuid::new_v4().to_string()))
        .bearer(&super_admin_token())
        .json(&recovery_body())
        .send(app(&harness))
        .await;
    assert_eq!(unknown.status(), 404);

    let invalid = AxumTestRequest::post(&admin_path("not-a-uuid"))
        .bearer(&super_admin_token())
        .json(&recovery_body())
        .send(app(&harness))
        .await;
    assert_eq!(invalid.status(), 400);
}

#[tokio::test]
async fn test_subdomain_availability_probe() {
    let harness = create_harness().await;
    AxumTestRequest::post(TENANTS)
        .bearer(&super_admin_token())
        .json(&provision_body("oak-ridge"))
        .send(app(&harness))
        .await;

    let free = AxumTestRequest::get("/api/platform/subdomains/Cedar-Heights/availability")
        .bearer(&super_admin_token())
        .send(app(&harness))
        .await;
    assert_eq!(free.status(), 200);
    let free: SubdomainAvailability = free.json();
    assert!(free.available);
    assert_eq!(free.subdomain, "cedar-heights");
    assert!(free.reason.is_none());

    let taken = AxumTestRequest::get("/api/platform/subdomains/oak-ridge/availability")
        .bearer(&super_admin_token())
        .send(app(&harness))
        .await;
    let taken: SubdomainAvailability = taken.json();
    assert!(!taken.available);
    assert!(taken.reason.is_some());

    let reserved = AxumTestRequest::get("/api/platform/subdomains/www/availability")
        .bearer(&super_admin_token())
        .send(app(&harness))
        .await;
    let reserved: SubdomainAvailability = reserved.json();
    assert!(!reserved.available);

    let anonymous = AxumTestRequest::get("/api/platform/subdomains/oak-ridge/availability")
        .send(app(&harness))
        .await;
    assert_eq!(anonymous.status(), 401);
}

#[tokio::test]
async fn test_health_reports_database() {
    let harness = create_harness().await;

    let response = AxumTestRequest::get("/health").send(app(&harness)).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["service"], "gatehouse-server");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let harness = create_harness().await;

    let generated = AxumTestRequest::get("/health").send(app(&harness)).await;
    assert!(generated.header("x-request-id").is_some());

    let supplied = AxumTestRequest::get("/health")
        .header("x-request-id", "req-1234")
        .send(app(&harness))
        .await;
    assert_eq!(supplied.header("x-request-id").as_deref(), Some("req-1234"));
}
