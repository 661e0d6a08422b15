// ABOUTME: Identity service abstraction for administrator account creation
// ABOUTME: IdentityProvider trait, account request/response types, and credential generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! External identity service integration
//!
//! The identity service owns login credentials. Gatehouse only asks it to
//! create pre-confirmed accounts and records the returned id locally.

/// One-time password generation
pub mod credentials;
/// GoTrue-compatible HTTP client
pub mod http;

pub use credentials::OneTimePassword;
pub use http::HttpIdentityProvider;

use crate::errors::AppResult;
use crate::models::TenantId;
use async_trait::async_trait;
use uuid::Uuid;

/// Account creation request for a tenant administrator
#[derive(Debug)]
pub struct NewAdminAccount<'a> {
    /// Login email
    pub email: &'a str,
    /// Initial password
    pub password: &'a OneTimePassword,
    /// Tenant the account is bound to
    pub tenant_id: TenantId,
    /// Role recorded in the account's app metadata
    pub role: &'a str,
    /// Given name
    pub first_name: &'a str,
    /// Family name
    pub last_name: &'a str,
    /// Contact phone
    pub phone: Option<&'a str>,
    /// Job title
    pub position: Option<&'a str>,
}

/// Account returned by the identity service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAccount {
    /// Identity-service account id
    pub id: Uuid,
    /// Confirmed email
    pub email: String,
}

/// Creates administrator accounts in an external identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an auto-confirmed account
    async fn create_admin_account(&self, account: &NewAdminAccount<'_>)
        -> AppResult<IdentityAccount>;
}
