// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses and validates server, store, collaborator, and provisioning settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Environment-based configuration management for production deployment

use crate::constants::{env_vars, limits};
use crate::database_plugins::{factory::DatabaseType, PROPERTY_INSERT_COLUMNS};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};
use url::Url;
use zeroize::Zeroizing;

/// Type-safe database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Database file location
        path: PathBuf,
    },
    /// `PostgreSQL` connection
    PostgreSQL {
        /// Full connection string
        connection_string: String,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(anyhow!("database URL is empty"));
        }
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            Ok(Self::PostgreSQL {
                connection_string: s.to_owned(),
            })
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::PostgreSQL { connection_string } => connection_string.clone(),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is a `SQLite` database
    #[must_use]
    pub const fn is_sqlite(&self) -> bool {
        matches!(self, Self::SQLite { .. } | Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/gatehouse.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostgreSQL { .. } => f.write_str("postgresql://[REDACTED]"),
            other => f.write_str(&other.to_connection_string()),
        }
    }
}

/// Secret string that is zeroed on drop and never printed
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
    /// Wrap a secret value
    #[must_use]
    pub fn new(value: String) -> Self {
        Self(Zeroizing::new(value))
    }

    /// Borrow the secret value
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Which email transport delivers activation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTransportKind {
    /// JSON HTTP email API
    Http,
    /// Log-only transport for development
    Log,
}

impl FromStr for EmailTransportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "log" => Ok(Self::Log),
            other => Err(anyhow!("unknown email transport '{other}' (expected http or log)")),
        }
    }
}

/// External identity service settings
#[derive(Debug, Clone)]
pub struct IdentityServiceConfig {
    /// Base URL of the GoTrue-compatible admin API
    pub base_url: Url,
    /// Service-role key sent as bearer credential
    pub service_key: SecretString,
}

/// Outbound email settings
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Transport selector
    pub transport: EmailTransportKind,
    /// HTTP email API endpoint (required for `Http`)
    pub api_url: Option<Url>,
    /// HTTP email API key (required for `Http`)
    pub api_key: Option<SecretString>,
    /// Sender address
    pub from: String,
}

/// Tenant portal URL settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// URL scheme, normally `https`
    pub scheme: String,
    /// Parent domain under which tenant subdomains live
    pub base_domain: String,
}

impl PortalConfig {
    /// Portal URL for a tenant subdomain
    #[must_use]
    pub fn portal_url(&self, subdomain: &str) -> String {
        format!("{}://{subdomain}.{}", self.scheme, self.base_domain)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_owned(),
            base_domain: "gatehouse.app".to_owned(),
        }
    }
}

/// Tuning knobs for the provisioning workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningSettings {
    /// Rows per multi-row insert
    pub resource_batch_size: usize,
    /// Length of generated one-time passwords
    pub one_time_password_length: usize,
    /// Where activation emails point administrators
    pub portal: PortalConfig,
}

impl Default for ProvisioningSettings {
    fn default() -> Self {
        Self {
            resource_batch_size: limits::DEFAULT_RESOURCE_BATCH_SIZE,
            one_time_password_length: limits::MIN_ONE_TIME_PASSWORD_LENGTH,
            portal: PortalConfig::default(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// HTTP listen address
    pub host: String,
    /// Relational store location
    pub database_url: DatabaseUrl,
    /// HS256 secret for platform tokens
    pub platform_jwt_secret: SecretString,
    /// Identity service
    pub identity: IdentityServiceConfig,
    /// Email transport
    pub email: EmailConfig,
    /// Workflow tuning
    pub provisioning: ProvisioningSettings,
    /// Per-request timeout for identity and email calls
    pub collaborator_timeout_secs: u64,
    /// Request body limit in bytes
    pub max_request_body_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value fails to parse
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let platform_jwt_secret = env::var(env_vars::PLATFORM_JWT_SECRET)
            .with_context(|| format!("{} must be set", env_vars::PLATFORM_JWT_SECRET))?;

        let identity = IdentityServiceConfig {
            base_url: parse_url_var(
                env_vars::IDENTITY_SERVICE_URL,
                &env::var(env_vars::IDENTITY_SERVICE_URL)
                    .with_context(|| format!("{} must be set", env_vars::IDENTITY_SERVICE_URL))?,
            )?,
            service_key: SecretString::new(
                env::var(env_vars::IDENTITY_SERVICE_KEY)
                    .with_context(|| format!("{} must be set", env_vars::IDENTITY_SERVICE_KEY))?,
            ),
        };

        let email = EmailConfig {
            transport: env_parse(env_vars::EMAIL_TRANSPORT, EmailTransportKind::Log)?,
            api_url: env::var(env_vars::EMAIL_API_URL)
                .ok()
                .map(|raw| parse_url_var(env_vars::EMAIL_API_URL, &raw))
                .transpose()?,
            api_key: env::var(env_vars::EMAIL_API_KEY).ok().map(SecretString::new),
            from: env::var(env_vars::EMAIL_FROM)
                .unwrap_or_else(|_| "Gatehouse <no-reply@gatehouse.app>".to_owned()),
        };

        let portal_defaults = PortalConfig::default();
        let provisioning = ProvisioningSettings {
            resource_batch_size: env_parse(
                env_vars::RESOURCE_BATCH_SIZE,
                limits::DEFAULT_RESOURCE_BATCH_SIZE,
            )?,
            one_time_password_length: env_parse(
                env_vars::ONE_TIME_PASSWORD_LENGTH,
                limits::MIN_ONE_TIME_PASSWORD_LENGTH,
            )?,
            portal: PortalConfig {
                scheme: env::var(env_vars::PORTAL_SCHEME).unwrap_or(portal_defaults.scheme),
                base_domain: env::var(env_vars::PORTAL_BASE_DOMAIN)
                    .unwrap_or(portal_defaults.base_domain),
            },
        };

        let config = Self {
            http_port: env_parse(env_vars::HTTP_PORT, 8081)?,
            host: env::var(env_vars::HOST).unwrap_or_else(|_| "127.0.0.1".to_owned()),
            database_url: match env::var(env_vars::DATABASE_URL) {
                Ok(raw) => DatabaseUrl::parse_url(&raw)
                    .with_context(|| format!("Invalid {} value", env_vars::DATABASE_URL))?,
                Err(_) => DatabaseUrl::default(),
            },
            platform_jwt_secret: SecretString::new(platform_jwt_secret),
            identity,
            email,
            provisioning,
            collaborator_timeout_secs: env_parse(
                env_vars::COLLABORATOR_TIMEOUT_SECS,
                limits::COLLABORATOR_TIMEOUT_SECS,
            )?,
            max_request_body_bytes: env_parse(
                env_vars::MAX_REQUEST_BODY_BYTES,
                limits::MAX_REQUEST_BODY_BYTES,
            )?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.platform_jwt_secret.expose().len() < limits::MIN_JWT_SECRET_BYTES {
            return Err(anyhow!(
                "{} must be at least {} bytes",
                env_vars::PLATFORM_JWT_SECRET,
                limits::MIN_JWT_SECRET_BYTES
            ));
        }

        if self.email.transport == EmailTransportKind::Http
            && (self.email.api_url.is_none() || self.email.api_key.is_none())
        {
            return Err(anyhow!(
                "EMAIL_TRANSPORT=http requires {} and {}",
                env_vars::EMAIL_API_URL,
                env_vars::EMAIL_API_KEY
            ));
        }

        if self.provisioning.resource_batch_size == 0 {
            return Err(anyhow!("{} must be positive", env_vars::RESOURCE_BATCH_SIZE));
        }

        let backend = if self.database_url.is_sqlite() {
            DatabaseType::SQLite
        } else {
            DatabaseType::PostgreSQL
        };
        let max_batch = backend.max_rows_per_insert(PROPERTY_INSERT_COLUMNS);
        if self.provisioning.resource_batch_size > max_batch {
            return Err(anyhow!(
                "{} must not exceed {max_batch} for {backend:?}",
                env_vars::RESOURCE_BATCH_SIZE
            ));
        }

        if self.provisioning.one_time_password_length < limits::MIN_ONE_TIME_PASSWORD_LENGTH {
            warn!(
                requested = self.provisioning.one_time_password_length,
                minimum = limits::MIN_ONE_TIME_PASSWORD_LENGTH,
                "One-time password length below minimum, the minimum will be used"
            );
        }

        if self.email.transport == EmailTransportKind::Log {
            warn!("Email transport is log-only; activation emails will not be delivered");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Gatehouse Server Configuration:\n\
             - Listen: {}:{}\n\
             - Database: {}\n\
             - Identity Service: {}\n\
             - Email Transport: {:?}\n\
             - Portal: {}://*.{}\n\
             - Resource Batch Size: {}\n\
             - Collaborator Timeout: {}s",
            self.host,
            self.http_port,
            if self.database_url.is_sqlite() {
                "SQLite"
            } else {
                "PostgreSQL"
            },
            self.identity.base_url,
            self.email.transport,
            self.provisioning.portal.scheme,
            self.provisioning.portal.base_domain,
            self.provisioning.resource_batch_size,
            self.collaborator_timeout_secs,
        )
    }
}

/// Parse an environment variable or fall back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn parse_url_var(key: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("Invalid {key} value: {raw}"))
}
