// ABOUTME: Database abstraction layer for the Gatehouse server
// ABOUTME: Plugin architecture for relational store support with SQLite and PostgreSQL backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use crate::errors::AppResult;
use crate::models::{AdminProfile, Gate, Property, Tenant, TenantId};
use async_trait::async_trait;

/// Backend selection and the delegating `Database` enum
pub mod factory;
/// `SQLite` backend
pub mod sqlite;

/// `PostgreSQL` backend
#[cfg(feature = "postgresql")]
pub mod postgres;

/// Values bound per row by `create_properties`
pub const PROPERTY_INSERT_COLUMNS: usize = 15;
/// Values bound per row by `create_gates`
pub const GATE_INSERT_COLUMNS: usize = 11;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the application layer. Uniqueness violations
/// surface as `ErrorCode::ResourceAlreadyExists`; every other store failure
/// surfaces as `ErrorCode::DatabaseError`.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Connect to the store and run migrations
    async fn new(database_url: &str) -> AppResult<Self>
    where
        Self: Sized;

    /// Run database migrations to set up schema
    async fn migrate(&self) -> AppResult<()>;

    /// Round-trip a trivial query
    async fn health_check(&self) -> AppResult<()>;

    // ================================
    // Tenants
    // ================================

    /// Whether a tenant already uses `subdomain`, compared case-insensitively
    async fn subdomain_exists(&self, subdomain: &str) -> AppResult<bool>;

    /// Insert a tenant row
    async fn create_tenant(&self, tenant: &Tenant) -> AppResult<()>;

    /// Get tenant by id
    async fn get_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>>;

    /// Get tenant by subdomain, compared case-insensitively
    async fn get_tenant_by_subdomain(&self, subdomain: &str) -> AppResult<Option<Tenant>>;

    // ================================
    // Tenant resources
    // ================================

    /// Insert properties with one multi-row statement, returning rows created
    async fn create_properties(&self, properties: &[Property]) -> AppResult<u64>;

    /// Insert gates with one multi-row statement, returning rows created
    async fn create_gates(&self, gates: &[Gate]) -> AppResult<u64>;

    /// Number of properties owned by a tenant
    async fn count_properties(&self, tenant_id: TenantId) -> AppResult<i64>;

    /// Number of gates owned by a tenant
    async fn count_gates(&self, tenant_id: TenantId) -> AppResult<i64>;

    // ================================
    // Administrator profiles
    // ================================

    /// Insert an administrator profile row
    async fn create_admin_profile(&self, profile: &AdminProfile) -> AppResult<()>;

    /// Get the admin head profile of a tenant, if one exists
    async fn get_admin_profile_for_tenant(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<AdminProfile>>;
}
