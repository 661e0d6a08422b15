// ABOUTME: Subdomain validator for new tenants
// ABOUTME: Normalizes candidates, checks DNS label rules and reserved words, then store uniqueness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Subdomain validation
//!
//! The check here is advisory. Two concurrent requests for the same label can
//! both pass [`check_uniqueness`]; the case-insensitive unique index on
//! `tenants.subdomain` decides which insert wins.

use crate::constants::subdomain::{LABEL_PATTERN, MAX_LENGTH, MIN_LENGTH, RESERVED};
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

static LABEL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(LABEL_PATTERN).ok());

/// Why a subdomain candidate was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubdomainRejection {
    /// Shorter than the minimum label length
    TooShort,
    /// Longer than a DNS label allows
    TooLong,
    /// Characters or hyphen placement outside the DNS label pattern
    InvalidCharacters,
    /// Contains `--`
    ConsecutiveHyphens,
    /// Reserved for platform use
    Reserved(String),
    /// Another tenant already uses it
    Taken(String),
}

impl fmt::Display for SubdomainRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "Subdomain must be at least {MIN_LENGTH} characters"),
            Self::TooLong => write!(f, "Subdomain must be at most {MAX_LENGTH} characters"),
            Self::InvalidCharacters => f.write_str(
                "Subdomain may contain only lowercase letters, digits and hyphens, \
                 and must start and end with a letter or digit",
            ),
            Self::ConsecutiveHyphens => f.write_str("Subdomain cannot contain consecutive hyphens"),
            Self::Reserved(label) => write!(f, "Subdomain '{label}' is reserved"),
            Self::Taken(label) => write!(f, "Subdomain '{label}' is already taken"),
        }
    }
}

impl From<SubdomainRejection> for AppError {
    fn from(rejection: SubdomainRejection) -> Self {
        Self::invalid_input(rejection.to_string())
    }
}

/// Check the shape of a candidate and return its normalized form
///
/// Normalization trims surrounding whitespace and lowercases.
///
/// # Errors
/// Returns the first rule the candidate breaks
pub fn validate_format(raw: &str) -> Result<String, SubdomainRejection> {
    let normalized = raw.trim().to_lowercase();
    let length = normalized.chars().count();

    if length < MIN_LENGTH {
        return Err(SubdomainRejection::TooShort);
    }
    if length > MAX_LENGTH {
        return Err(SubdomainRejection::TooLong);
    }

    let matches_label = LABEL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(&normalized));
    if !matches_label {
        return Err(SubdomainRejection::InvalidCharacters);
    }
    if normalized.contains("--") {
        return Err(SubdomainRejection::ConsecutiveHyphens);
    }
    if RESERVED.contains(&normalized.as_str()) {
        return Err(SubdomainRejection::Reserved(normalized));
    }

    Ok(normalized)
}

/// Check that no tenant uses an already-normalized subdomain
///
/// # Errors
/// The outer error is a store failure; the inner one means the label is taken
pub async fn check_uniqueness(
    database: &Database,
    normalized: &str,
) -> AppResult<Result<(), SubdomainRejection>> {
    if database.subdomain_exists(normalized).await? {
        debug!(subdomain = %normalized, "Subdomain already in use");
        return Ok(Err(SubdomainRejection::Taken(normalized.to_owned())));
    }
    Ok(Ok(()))
}

/// Format check followed by the uniqueness check
///
/// The store is not queried when the format check fails.
///
/// # Errors
/// The outer error is a store failure; the inner one is the rejection reason
pub async fn validate(
    database: &Database,
    raw: &str,
) -> AppResult<Result<String, SubdomainRejection>> {
    let normalized = match validate_format(raw) {
        Ok(normalized) => normalized,
        Err(rejection) => return Ok(Err(rejection)),
    };
    Ok(check_uniqueness(database, &normalized)
        .await?
        .map(|()| normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(validate_format("  OakRidge  ").unwrap(), "oakridge");
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(validate_format("ab"), Err(SubdomainRejection::TooShort));
        assert!(validate_format("abc").is_ok());
        assert!(validate_format(&"a".repeat(63)).is_ok());
        assert_eq!(validate_format(&"a".repeat(64)), Err(SubdomainRejection::TooLong));
    }

    #[test]
    fn test_label_shape() {
        assert_eq!(validate_format("-oak"), Err(SubdomainRejection::InvalidCharacters));
        assert_eq!(validate_format("oak-"), Err(SubdomainRejection::InvalidCharacters));
        assert_eq!(validate_format("oak_ridge"), Err(SubdomainRejection::InvalidCharacters));
        assert_eq!(validate_format("oak.ridge"), Err(SubdomainRejection::InvalidCharacters));
        assert_eq!(validate_format("oak--ridge"), Err(SubdomainRejection::ConsecutiveHyphens));
        assert_eq!(validate_format("oak-ridge-2").unwrap(), "oak-ridge-2");
    }

    #[test]
    fn test_reserved_words_rejected_after_normalization() {
        assert_eq!(
            validate_format("ADMIN"),
            Err(SubdomainRejection::Reserved("admin".to_owned()))
        );
        for word in RESERVED {
            assert!(validate_format(word).is_err(), "{word} should be reserved");
        }
    }
}
