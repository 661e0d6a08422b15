// ABOUTME: HTTP client for a GoTrue-compatible identity admin API
// ABOUTME: Creates pre-confirmed admin accounts with tenant and role metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::{IdentityAccount, IdentityProvider, NewAdminAccount};
use crate::config::environment::{IdentityServiceConfig, SecretString};
use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

/// Longest slice of an error body kept in error messages
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
struct CreatedUser {
    id: Uuid,
    email: Option<String>,
}

/// Identity provider backed by `POST {base}/admin/users`
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    base_url: Url,
    service_key: SecretString,
}

impl HttpIdentityProvider {
    /// Create a client with a per-request timeout
    #[must_use]
    pub fn new(config: &IdentityServiceConfig, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
        }
    }

    fn users_endpoint(&self) -> String {
        format!("{}/admin/users", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_admin_account(
        &self,
        account: &NewAdminAccount<'_>,
    ) -> AppResult<IdentityAccount> {
        let tenant_id = account.tenant_id.to_string();
        let body = json!({
            "email": account.email,
            "password": account.password.expose(),
            "email_confirm": true,
            "app_metadata": {
                "role": account.role,
                "tenant_id": tenant_id,
            },
            "user_metadata": {
                "first_name": account.first_name,
                "last_name": account.last_name,
                "phone": account.phone,
                "position": account.position,
                "tenant_id": tenant_id,
            },
        });

        let response = self
            .client
            .post(self.users_endpoint())
            .bearer_auth(self.service_key.expose())
            .header("apikey", self.service_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(service_names::IDENTITY_SERVICE, e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                tenant_id = %account.tenant_id,
                "Identity service rejected admin account creation"
            );
            let detail: String = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(AppError::external_service(
                service_names::IDENTITY_SERVICE,
                format!("HTTP {}: {detail}", status.as_u16()),
            ));
        }

        let created: CreatedUser = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service(
                service_names::IDENTITY_SERVICE,
                format!("Unexpected create-user response: {e}"),
            )
        })?;

        info!(
            user_id = %created.id,
            tenant_id = %account.tenant_id,
            "Identity account created"
        );

        Ok(IdentityAccount {
            id: created.id,
            email: created.email.unwrap_or_else(|| account.email.to_owned()),
        })
    }
}
