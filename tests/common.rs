// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory store, fake identity service, recording email transport, and token helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `gatehouse_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use async_trait::async_trait;
use gatehouse_server::{
    admin::{verify_super_admin, PlatformJwtManager, SuperAdmin},
    config::environment::{
        DatabaseUrl, EmailConfig, EmailTransportKind, IdentityServiceConfig, ProvisioningSettings,
        SecretString, ServerConfig,
    },
    constants::roles,
    database_plugins::{factory::Database, DatabaseProvider},
    errors::{AppError, AppResult},
    identity::{IdentityAccount, IdentityProvider, NewAdminAccount},
    notifications::{EmailTransport, OutboundEmail},
    provisioning::ProvisioningOrchestrator,
    server::ServerResources,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};
use url::Url;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Shared HS256 secret for test tokens
pub const TEST_JWT_SECRET: &str = "gatehouse-test-secret-with-at-least-32-bytes";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Raw pool of a `SQLite` test database, for fixtures and failure injection
pub fn sqlite_pool(database: &Database) -> &SqlitePool {
    #[allow(irrefutable_let_patterns)]
    let Database::SQLite(sqlite) = database else {
        panic!("integration tests run against SQLite");
    };
    sqlite.pool()
}

/// Make every insert into `table` fail
pub async fn fail_inserts_into(database: &Database, table: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_{table} BEFORE INSERT ON {table} \
         BEGIN SELECT RAISE(ABORT, 'injected {table} failure'); END"
    );
    sqlx::query(&sql)
        .execute(sqlite_pool(database))
        .await
        .unwrap();
}

/// Make property inserts fail whenever a row has `address`
pub async fn fail_property_address(database: &Database, address: &str) {
    let sql = format!(
        "CREATE TRIGGER fail_property_address BEFORE INSERT ON properties \
         WHEN NEW.address = '{address}' \
         BEGIN SELECT RAISE(ABORT, 'injected property failure'); END"
    );
    sqlx::query(&sql)
        .execute(sqlite_pool(database))
        .await
        .unwrap();
}

/// Number of rows in `table`
pub async fn count_rows(database: &Database, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(sqlite_pool(database))
        .await
        .unwrap()
}

// ================================
// Platform tokens
// ================================

/// Token manager using [`TEST_JWT_SECRET`]
pub fn test_jwt_manager() -> PlatformJwtManager {
    PlatformJwtManager::new(TEST_JWT_SECRET.as_bytes())
}

/// Signed token for `role`, valid for one hour
pub fn token_for_role(role: &str) -> String {
    test_jwt_manager()
        .generate_token("ops@gatehouse.example", role, chrono::Duration::hours(1))
        .unwrap()
}

/// Signed super admin token
pub fn super_admin_token() -> String {
    token_for_role(roles::SUPER_ADMIN)
}

/// Verified super admin capability
pub fn super_admin() -> SuperAdmin {
    verify_super_admin(&test_jwt_manager(), &super_admin_token()).unwrap()
}

// ================================
// Collaborator fakes
// ================================

/// Account creation request as seen by the fake identity service
#[derive(Debug, Clone)]
pub struct RecordedAccount {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub tenant_id: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

/// Identity service double that records requests and can be told to fail
#[derive(Default)]
pub struct MockIdentityProvider {
    fail: AtomicBool,
    accounts: Mutex<Vec<RecordedAccount>>,
}

impl MockIdentityProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let provider = Self::default();
        provider.fail.store(true, Ordering::SeqCst);
        Arc::new(provider)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn accounts(&self) -> Vec<RecordedAccount> {
        self.accounts.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_admin_account(
        &self,
        account: &NewAdminAccount<'_>,
    ) -> AppResult<IdentityAccount> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service(
                "identity-service",
                "HTTP 500: upstream unavailable",
            ));
        }
        let id = Uuid::new_v4();
        self.accounts.lock().unwrap().push(RecordedAccount {
            id,
            email: account.email.to_owned(),
            password: account.password.expose().to_owned(),
            tenant_id: account.tenant_id.to_string(),
            role: account.role.to_owned(),
            first_name: account.first_name.to_owned(),
            last_name: account.last_name.to_owned(),
        });
        Ok(IdentityAccount {
            id,
            email: account.email.to_owned(),
        })
    }
}

/// Message captured by [`RecordingEmailTransport`]
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Email transport double that records messages and can be told to fail
#[derive(Default)]
pub struct RecordingEmailTransport {
    fail: AtomicBool,
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let transport = Self::default();
        transport.fail.store(true, Ordering::SeqCst);
        Arc::new(transport)
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_unavailable(
                "email-transport",
                "connection refused",
            ));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: email.to.clone(),
            subject: email.subject.clone(),
            html: email.html.as_str().to_owned(),
            text: email.text.as_str().to_owned(),
        });
        Ok(())
    }
}

// ================================
// Workflow fixtures
// ================================

/// Everything a workflow test needs to inspect
pub struct TestHarness {
    pub database: Database,
    pub identity: Arc<MockIdentityProvider>,
    pub email: Arc<RecordingEmailTransport>,
    pub orchestrator: ProvisioningOrchestrator,
}

/// Settings used by tests unless overridden
pub fn test_settings() -> ProvisioningSettings {
    ProvisioningSettings::default()
}

/// Orchestrator over an in-memory store and the given doubles
pub async fn create_harness_with(
    identity: Arc<MockIdentityProvider>,
    email: Arc<RecordingEmailTransport>,
    settings: ProvisioningSettings,
) -> TestHarness {
    let database = create_test_database().await.unwrap();
    let orchestrator = ProvisioningOrchestrator::new(
        database.clone(),
        identity.clone(),
        email.clone(),
        settings,
    );
    TestHarness {
        database,
        identity,
        email,
        orchestrator,
    }
}

/// Orchestrator with healthy collaborators
pub async fn create_harness() -> TestHarness {
    create_harness_with(
        MockIdentityProvider::new(),
        RecordingEmailTransport::new(),
        test_settings(),
    )
    .await
}

/// Server configuration matching the test doubles
pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        host: "127.0.0.1".to_owned(),
        database_url: DatabaseUrl::Memory,
        platform_jwt_secret: SecretString::new(TEST_JWT_SECRET.to_owned()),
        identity: IdentityServiceConfig {
            base_url: Url::parse("http://identity.invalid").unwrap(),
            service_key: SecretString::new("service-key".to_owned()),
        },
        email: EmailConfig {
            transport: EmailTransportKind::Log,
            api_url: None,
            api_key: None,
            from: "Gatehouse <no-reply@gatehouse.test>".to_owned(),
        },
        provisioning: test_settings(),
        collaborator_timeout_secs: 5,
        max_request_body_bytes: 1024 * 1024,
    }
}

/// Server resources over the harness collaborators
pub fn server_resources(harness: &TestHarness) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        harness.database.clone(),
        harness.identity.clone(),
        harness.email.clone(),
        test_jwt_manager(),
        &test_server_config(),
    ))
}

// ================================
// Request bodies
// ================================

/// Minimal valid provisioning request body
pub fn provision_body(subdomain: &str) -> Value {
    json!({
        "name": "Oak Ridge Estates",
        "subdomain": subdomain,
        "community_type": "HOA",
        "max_residences": 120,
        "admin_email": "dana.reyes@oakridge.example",
        "admin_first_name": "Dana",
        "admin_last_name": "Reyes",
        "admin_phone": "+63 917 555 0100",
        "admin_position": "Board President"
    })
}

/// `count` property descriptors with distinct addresses
pub fn property_bodies(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "address": format!("Block 1 Lot {i}"),
                    "block": "1",
                    "lot": i.to_string(),
                    "property_type": "single_family",
                    "bedrooms": 3
                })
            })
            .collect(),
    )
}

/// Two gate descriptors
pub fn gate_bodies() -> Value {
    json!([
        {
            "name": "Main Gate",
            "gate_type": "primary",
            "operating_hours_start": "05:00",
            "operating_hours_end": "23:00",
            "gps_lat": 14.5547,
            "gps_lng": 121.0244
        },
        { "name": "Service Gate", "gate_type": "service" }
    ])
}
