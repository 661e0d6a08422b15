// ABOUTME: PostgreSQL implementation of the DatabaseProvider trait
// ABOUTME: Native UUID and TIMESTAMPTZ columns with a lower(subdomain) unique index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! `PostgreSQL` database implementation
//!
//! This module provides `PostgreSQL` support for production deployments,
//! implementing the same interface as the `SQLite` version.

use super::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{AdminProfile, Gate, Property, Tenant, TenantId};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::debug;
use uuid::Uuid;

/// `PostgreSQL` database implementation
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl PostgresDatabase {
    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProvider for PostgresDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tenants (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                legal_name TEXT,
                subdomain TEXT NOT NULL,
                community_type TEXT NOT NULL
                    CHECK (community_type IN ('HOA', 'Condo', 'Gated Village', 'Subdivision')),
                year_established INTEGER,
                max_residences BIGINT NOT NULL,
                total_residences BIGINT NOT NULL DEFAULT 0,
                max_admin_users BIGINT NOT NULL,
                max_security_users BIGINT NOT NULL,
                storage_quota_gb BIGINT NOT NULL,
                timezone TEXT NOT NULL,
                language TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_tenants_subdomain_lower ON tenants (lower(subdomain))",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS properties (
                id UUID PRIMARY KEY,
                tenant_id UUID NOT NULL REFERENCES tenants(id),
                address TEXT NOT NULL,
                phase TEXT,
                block TEXT,
                lot TEXT,
                unit TEXT,
                property_type TEXT NOT NULL
                    CHECK (property_type IN ('single_family', 'townhouse', 'condo', 'lot_only')),
                property_size_sqm DOUBLE PRECISION,
                lot_size_sqm DOUBLE PRECISION,
                bedrooms INTEGER,
                bathrooms INTEGER,
                parking_slots INTEGER,
                status TEXT NOT NULL DEFAULT 'vacant',
                created_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_properties_tenant ON properties(tenant_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS gates (
                id UUID PRIMARY KEY,
                tenant_id UUID NOT NULL REFERENCES tenants(id),
                name TEXT NOT NULL,
                gate_type TEXT NOT NULL
                    CHECK (gate_type IN ('primary', 'secondary', 'service', 'emergency')),
                operating_hours_start TEXT,
                operating_hours_end TEXT,
                gps_lat DOUBLE PRECISION CHECK (gps_lat BETWEEN -90 AND 90),
                gps_lng DOUBLE PRECISION CHECK (gps_lng BETWEEN -180 AND 180),
                rfid_reader_serial TEXT,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_gates_tenant ON gates(tenant_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS admin_profiles (
                user_id UUID PRIMARY KEY,
                tenant_id UUID NOT NULL REFERENCES tenants(id),
                role TEXT NOT NULL,
                email TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                phone TEXT,
                position TEXT,
                created_at TIMESTAMPTZ NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_admin_profiles_head
                ON admin_profiles(tenant_id) WHERE role = 'admin_head'
            ",
        )
        .execute(&self.pool)
        .await?;

        debug!("PostgreSQL schema is up to date");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn subdomain_exists(&self, subdomain: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM tenants WHERE lower(subdomain) = lower($1) LIMIT 1")
            .bind(subdomain)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn create_tenant(&self, tenant: &Tenant) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO tenants (
                id, name, legal_name, subdomain, community_type, year_established,
                max_residences, total_residences, max_admin_users, max_security_users,
                storage_quota_gb, timezone, language, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(tenant.id.as_uuid())
        .bind(&tenant.name)
        .bind(&tenant.legal_name)
        .bind(&tenant.subdomain)
        .bind(tenant.community_type.as_str())
        .bind(tenant.year_established)
        .bind(tenant.max_residences)
        .bind(tenant.total_residences)
        .bind(tenant.max_admin_users)
        .bind(tenant.max_security_users)
        .bind(tenant.storage_quota_gb)
        .bind(&tenant.timezone)
        .bind(&tenant.language)
        .bind(tenant.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE id = $1")
            .bind(tenant_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_tenant).transpose()
    }

    async fn get_tenant_by_subdomain(&self, subdomain: &str) -> AppResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE lower(subdomain) = lower($1)")
            .bind(subdomain)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_tenant).transpose()
    }

    async fn create_properties(&self, properties: &[Property]) -> AppResult<u64> {
        if properties.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO properties (id, tenant_id, address, phase, block, lot, unit, \
             property_type, property_size_sqm, lot_size_sqm, bedrooms, bathrooms, \
             parking_slots, status, created_at) ",
        );
        builder.push_values(properties, |mut row, property| {
            row.push_bind(property.id)
                .push_bind(property.tenant_id.as_uuid())
                .push_bind(property.address.clone())
                .push_bind(property.phase.clone())
                .push_bind(property.block.clone())
                .push_bind(property.lot.clone())
                .push_bind(property.unit.clone())
                .push_bind(property.property_type.as_str())
                .push_bind(property.property_size_sqm)
                .push_bind(property.lot_size_sqm)
                .push_bind(property.bedrooms)
                .push_bind(property.bathrooms)
                .push_bind(property.parking_slots)
                .push_bind(property.status.clone())
                .push_bind(property.created_at);
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn create_gates(&self, gates: &[Gate]) -> AppResult<u64> {
        if gates.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO gates (id, tenant_id, name, gate_type, operating_hours_start, \
             operating_hours_end, gps_lat, gps_lng, rfid_reader_serial, status, created_at) ",
        );
        builder.push_values(gates, |mut row, gate| {
            row.push_bind(gate.id)
                .push_bind(gate.tenant_id.as_uuid())
                .push_bind(gate.name.clone())
                .push_bind(gate.gate_type.as_str())
                .push_bind(gate.operating_hours_start.clone())
                .push_bind(gate.operating_hours_end.clone())
                .push_bind(gate.gps_lat)
                .push_bind(gate.gps_lng)
                .push_bind(gate.rfid_reader_serial.clone())
                .push_bind(gate.status.clone())
                .push_bind(gate.created_at);
        });

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count_properties(&self, tenant_id: TenantId) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE tenant_id = $1")
            .bind(tenant_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_gates(&self, tenant_id: TenantId) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gates WHERE tenant_id = $1")
            .bind(tenant_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create_admin_profile(&self, profile: &AdminProfile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO admin_profiles (
                user_id, tenant_id, role, email, first_name, last_name, phone, position, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(profile.user_id)
        .bind(profile.tenant_id.as_uuid())
        .bind(&profile.role)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.phone)
        .bind(&profile.position)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_admin_profile_for_tenant(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<Option<AdminProfile>> {
        let row = sqlx::query(
            "SELECT * FROM admin_profiles WHERE tenant_id = $1 AND role = 'admin_head' LIMIT 1",
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_admin_profile).transpose()
    }
}

fn row_to_tenant(row: &PgRow) -> AppResult<Tenant> {
    let id: Uuid = row.try_get("id")?;
    let community_type: String = row.try_get("community_type")?;
    Ok(Tenant {
        id: TenantId::from(id),
        name: row.try_get("name")?,
        legal_name: row.try_get("legal_name")?,
        subdomain: row.try_get("subdomain")?,
        community_type: community_type.parse().map_err(AppError::database)?,
        year_established: row.try_get("year_established")?,
        max_residences: row.try_get("max_residences")?,
        total_residences: row.try_get("total_residences")?,
        max_admin_users: row.try_get("max_admin_users")?,
        max_security_users: row.try_get("max_security_users")?,
        storage_quota_gb: row.try_get("storage_quota_gb")?,
        timezone: row.try_get("timezone")?,
        language: row.try_get("language")?,
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_admin_profile(row: &PgRow) -> AppResult<AdminProfile> {
    let tenant_id: Uuid = row.try_get("tenant_id")?;
    Ok(AdminProfile {
        user_id: row.try_get("user_id")?,
        tenant_id: TenantId::from(tenant_id),
        role: row.try_get("role")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone: row.try_get("phone")?,
        position: row.try_get("position")?,
        created_at: row.try_get("created_at")?,
    })
}
