// ABOUTME: JWT token generation and validation for platform administrator authentication
// ABOUTME: Signs and verifies HS256 platform tokens carrying the caller's role claim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! JWT Token Generation and Validation for Platform Authentication
//!
//! Platform tokens are issued by the `platform-admin` CLI (or an upstream
//! console) and presented as bearer credentials on every platform API call.

use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a platform token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformTokenClaims {
    /// Issuer
    pub iss: String,
    /// Subject: the operator's email
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Expiration (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Token id
    pub jti: String,
    /// Platform role, e.g. `super_admin`
    pub role: String,
}

/// JWT token manager for platform authentication
#[derive(Clone)]
pub struct PlatformJwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl PlatformJwtManager {
    /// Create a manager from the shared HS256 secret
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[service_names::PLATFORM_ISSUER]);
        validation.set_audience(&[service_names::PLATFORM_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Generate a signed platform token
    ///
    /// # Errors
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, subject: &str, role: &str, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = PlatformTokenClaims {
            iss: service_names::PLATFORM_ISSUER.to_owned(),
            sub: subject.to_owned(),
            aud: service_names::PLATFORM_AUDIENCE.to_owned(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            role: role.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign platform token: {e}")))
    }

    /// Validate and decode a platform token
    ///
    /// # Errors
    /// Returns an error if the token is malformed, forged, expired, or issued for another audience
    pub fn validate_token(&self, token: &str) -> AppResult<PlatformTokenClaims> {
        decode::<PlatformTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::auth_expired(),
                _ => AppError::auth_invalid(format!("Platform token validation failed: {e}")),
            })
    }
}
