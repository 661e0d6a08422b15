// ABOUTME: Email transports for activation messages
// ABOUTME: JSON HTTP email API client plus a log-only transport for development
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::{EmailTransport, OutboundEmail};
use crate::config::environment::{EmailConfig, SecretString};
use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Sends email through an HTTP API accepting `{from, to, subject, html, text}`
#[derive(Clone)]
pub struct HttpEmailTransport {
    client: Client,
    api_url: Url,
    api_key: SecretString,
    from: String,
}

impl HttpEmailTransport {
    /// Create a transport from configuration
    ///
    /// # Errors
    /// Returns a configuration error if the API URL or key is missing
    pub fn from_config(config: &EmailConfig, timeout: Duration) -> AppResult<Self> {
        let api_url = config
            .api_url
            .clone()
            .ok_or_else(|| AppError::config("EMAIL_API_URL is required for the http transport"))?;
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("EMAIL_API_KEY is required for the http transport"))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            api_url,
            api_key,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl EmailTransport for HttpEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> AppResult<()> {
        let body = json!({
            "from": self.from,
            "to": [email.to],
            "subject": email.subject,
            "html": email.html.as_str(),
            "text": email.text.as_str(),
        });

        let response = self
            .client
            .post(self.api_url.clone())
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external_unavailable(service_names::EMAIL_SERVICE, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Email API rejected message");
            return Err(AppError::external_service(
                service_names::EMAIL_SERVICE,
                format!("HTTP {}: {}", status.as_u16(), text.chars().take(512).collect::<String>()),
            ));
        }

        info!(subject = %email.subject, "Email accepted by transport");
        Ok(())
    }
}

/// Logs message metadata instead of delivering it
#[derive(Debug, Clone, Default)]
pub struct LogEmailTransport;

#[async_trait]
impl EmailTransport for LogEmailTransport {
    async fn send(&self, email: &OutboundEmail) -> AppResult<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            text_bytes = email.text.len(),
            "Email delivery skipped (log transport)"
        );
        Ok(())
    }
}
