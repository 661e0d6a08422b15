// ABOUTME: Super-admin capability and bearer credential verification
// ABOUTME: Produces a SuperAdmin value only after a platform token with the right role verifies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Platform Authorization
//!
//! Workflow entry points take a [`SuperAdmin`] by reference. The type has no
//! public constructor, so holding one proves that a caller's bearer token was
//! verified and carried the `super_admin` role.

use crate::admin::jwt::PlatformJwtManager;
use crate::constants::roles;
use crate::errors::{AppError, AppResult};
use axum::http::{header, HeaderMap};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::{info, warn};

/// Proof that the caller is a platform super administrator
#[derive(Debug, Clone)]
pub struct SuperAdmin {
    subject: String,
    token_id: String,
}

impl SuperAdmin {
    /// Operator identity from the verified token
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Id of the token that was verified
    #[must_use]
    pub fn token_id(&self) -> &str {
        &self.token_id
    }
}

/// Verify a raw platform token and require the super-admin role
///
/// # Errors
/// Returns `AuthInvalid`/`AuthExpired` for bad tokens and `PermissionDenied` for other roles
pub fn verify_super_admin(jwt_manager: &PlatformJwtManager, token: &str) -> AppResult<SuperAdmin> {
    let claims = jwt_manager.validate_token(token)?;

    if claims.role != roles::SUPER_ADMIN {
        warn!(
            subject = %claims.sub,
            role = %claims.role,
            "Platform call rejected: role is not super_admin"
        );
        return Err(AppError::permission_denied(
            "Super administrator role required",
        ));
    }

    info!(subject = %claims.sub, "Super administrator authenticated");
    Ok(SuperAdmin {
        subject: claims.sub,
        token_id: claims.jti,
    })
}

/// Authenticate the `Authorization: Bearer` header of a platform request
///
/// # Errors
/// Returns `AuthRequired` when the header is absent, otherwise as [`verify_super_admin`]
pub fn authorize_super_admin(
    headers: &HeaderMap,
    jwt_manager: &PlatformJwtManager,
) -> AppResult<SuperAdmin> {
    if !headers.contains_key(header::AUTHORIZATION) {
        return Err(AppError::auth_required());
    }

    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        return Err(AppError::auth_invalid(
            "Authorization header must use the Bearer scheme",
        ));
    };

    verify_super_admin(jwt_manager, bearer.token())
}
