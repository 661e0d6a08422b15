// ABOUTME: SQLite implementation of the DatabaseProvider trait
// ABOUTME: Schema migrations, case-insensitive subdomain uniqueness, and multi-row resource inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! `SQLite` database implementation
//!
//! Identifiers are stored as TEXT. The subdomain column uses `COLLATE NOCASE`
//! so the unique constraint and lookups ignore case.

use super::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{AdminProfile, Gate, Property, Tenant, TenantId};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate_tenants(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tenants (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                legal_name TEXT,
                subdomain TEXT NOT NULL COLLATE NOCASE UNIQUE,
                community_type TEXT NOT NULL
                    CHECK (community_type IN ('HOA', 'Condo', 'Gated Village', 'Subdivision')),
                year_established INTEGER,
                max_residences INTEGER NOT NULL,
                total_residences INTEGER NOT NULL DEFAULT 0,
                max_admin_users INTEGER NOT NULL,
                max_security_users INTEGER NOT NULL,
                storage_quota_gb INTEGER NOT NULL,
                timezone TEXT NOT NULL,
                language TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn migrate_resources(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS properties (
                id TEXT PRIMARY KEY,
                tenant_id TEXT NOT NULL REFERENCES tenants(id),
                address TEXT NOT NULL,
                phase TEXT,
                block TEXT,
                lot TEXT,
                unit TEXT,
                property_type TEXT NOT NULL
                    CHECK (property_type IN ('single_family', 'townhouse', 'condo', 'lot_only')),
                property_size_sqm REAL,
                lot_size_sqm REAL,
                bedrooms INTEGER,
                bathrooms INTEGER,
                parking_slots INTEGER,
                status TEXT NOT NULL DEFAULT 'vacant',
                created_at TEXT NOT NULL
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
                id TEXT PRIMARY KEY,
                tenant_id TEXT NOT NULL REFERENCES tenants(id),
                name TEXT NOT NULL,
                gate_type TEXT NOT NULL
                    CHECK (gate_type IN ('primary', 'secondary', 'service', 'emergency')),
                operating_hours_start TEXT,
                operating_hours_end TEXT,
                gps_lat REAL CHECK (gps_lat IS NULL OR (gps_lat >= -90 AND gps_lat <= 90)),
                gps_lng REAL CHECK (gps_lng IS NULL OR (gps_lng >= -180 AND gps_lng <= 180)),
                rfid_reader_serial TEXT,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_gates_tenant ON gates(tenant_id)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn migrate_admin_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS admin_profiles (
                user_id TEXT PRIMARY KEY,
                tenant_id TEXT NOT NULL REFERENCES tenants(id),
                role TEXT NOT NULL,
                email TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                phone TEXT,
                position TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // One admin head per tenant
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_admin_profiles_head
                ON admin_profiles(tenant_id) WHERE role = 'admin_head'
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives only as long as its connection
        let is_memory = database_url.contains(":memory:");
        let pool_options = if is_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> AppResult<()> {
        self.migrate_tenants().await?;
        self.migrate_resources().await?;
        self.migrate_admin_profiles().await?;
        debug!("SQLite schema is up to date");
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn subdomain_exists(&self, subdomain: &str) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM tenants WHERE subdomain = ?1 COLLATE NOCASE LIMIT 1")
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
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ",
        )
        .bind(tenant.id.to_string())
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
        let row = sqlx::query("SELECT * FROM tenants WHERE id = ?1")
            .bind(tenant_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_tenant).transpose()
    }

    async fn get_tenant_by_subdomain(&self, subdomain: &str) -> AppResult<Option<Tenant>> {
        let row = sqlx::query("SELECT * FROM tenants WHERE subdomain = ?1 COLLATE NOCASE")
            .bind(subdomain)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_tenant).transpose()
    }

    async fn create_properties(&self, properties: &[Property]) -> AppResult<u64> {
        if properties.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO properties (id, tenant_id, address, phase, block, lot, unit, \
             property_type, property_size_sqm, lot_size_sqm, bedrooms, bathrooms, \
             parking_slots, status, created_at) ",
        );
        builder.push_values(properties, |mut row, property| {
            row.push_bind(property.id.to_string())
                .push_bind(property.tenant_id.to_string())
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

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO gates (id, tenant_id, name, gate_type, operating_hours_start, \
             operating_hours_end, gps_lat, gps_lng, rfid_reader_serial, status, created_at) ",
        );
        builder.push_values(gates, |mut row, gate| {
            row.push_bind(gate.id.to_string())
                .push_bind(gate.tenant_id.to_string())
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
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE tenant_id = ?1")
            .bind(tenant_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_gates(&self, tenant_id: TenantId) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gates WHERE tenant_id = ?1")
            .bind(tenant_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create_admin_profile(&self, profile: &AdminProfile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO admin_profiles (
                user_id, tenant_id, role, email, first_name, last_name, phone, position, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(profile.tenant_id.to_string())
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
            "SELECT * FROM admin_profiles WHERE tenant_id = ?1 AND role = 'admin_head' LIMIT 1",
        )
        .bind(tenant_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_admin_profile).transpose()
    }
}

fn parse_uuid(raw: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid UUID in column {column}: {e}")))
}

fn row_to_tenant(row: &SqliteRow) -> AppResult<Tenant> {
    let id: String = row.try_get("id")?;
    let community_type: String = row.try_get("community_type")?;
    Ok(Tenant {
        id: TenantId::from(parse_uuid(&id, "tenants.id")?),
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

fn row_to_admin_profile(row: &SqliteRow) -> AppResult<AdminProfile> {
    let user_id: String = row.try_get("user_id")?;
    let tenant_id: String = row.try_get("tenant_id")?;
    Ok(AdminProfile {
        user_id: parse_uuid(&user_id, "admin_profiles.user_id")?,
        tenant_id: TenantId::from(parse_uuid(&tenant_id, "admin_profiles.tenant_id")?),
        role: row.try_get("role")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone: row.try_get("phone")?,
        position: row.try_get("position")?,
        created_at: row.try_get("created_at")?,
    })
}
