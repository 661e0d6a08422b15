// ABOUTME: Platform administrator token utility for the Gatehouse API
// ABOUTME: Issues and inspects HS256 platform tokens signed with PLATFORM_JWT_SECRET
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Platform token management
//!
//! Usage:
//! ```bash
//! # Issue a super admin token valid for 8 hours
//! cargo run --bin platform-admin -- issue-token --email ops@gatehouse.example
//!
//! # Issue a shorter-lived token
//! cargo run --bin platform-admin -- issue-token --email ops@gatehouse.example --hours 1
//!
//! # Check a token and print its claims
//! cargo run --bin platform-admin -- verify-token eyJhbGciOi...
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gatehouse_server::{
    admin::PlatformJwtManager,
    constants::{env_vars, limits, roles},
    logging::{LogFormat, LoggingConfig},
};
use std::env;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "platform-admin",
    about = "Gatehouse platform token management",
    long_about = "Issue and inspect platform tokens accepted by the Gatehouse provisioning API."
)]
struct PlatformAdminArgs {
    #[command(subcommand)]
    command: PlatformCommand,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum PlatformCommand {
    /// Issue a signed platform token
    IssueToken {
        /// Operator email recorded as the token subject
        #[arg(long)]
        email: String,

        /// Role claim
        #[arg(long, default_value = roles::SUPER_ADMIN)]
        role: String,

        /// Lifetime in hours
        #[arg(long, default_value_t = limits::PLATFORM_TOKEN_HOURS)]
        hours: i64,
    },

    /// Verify a platform token and print its claims
    VerifyToken {
        /// Token to check
        token: String,
    },
}

fn main() -> Result<()> {
    let args = PlatformAdminArgs::parse();

    LoggingConfig {
        level: if args.verbose { "debug" } else { "warn" }.to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()?;

    let secret = env::var(env_vars::PLATFORM_JWT_SECRET)
        .with_context(|| format!("{} must be set", env_vars::PLATFORM_JWT_SECRET))?;
    if secret.len() < limits::MIN_JWT_SECRET_BYTES {
        return Err(anyhow!(
            "{} must be at least {} bytes",
            env_vars::PLATFORM_JWT_SECRET,
            limits::MIN_JWT_SECRET_BYTES
        ));
    }
    let manager = PlatformJwtManager::new(secret.as_bytes());

    match args.command {
        PlatformCommand::IssueToken { email, role, hours } => {
            if hours <= 0 {
                return Err(anyhow!("--hours must be positive"));
            }
            let token = manager
                .generate_token(&email, &role, chrono::Duration::hours(hours))
                .map_err(|e| anyhow!("Failed to issue token: {e}"))?;
            info!(subject = %email, role = %role, hours, "Platform token issued");
            println!("{token}");
        }
        PlatformCommand::VerifyToken { token } => {
            let claims = manager
                .validate_token(&token)
                .map_err(|e| anyhow!("Token rejected: {e}"))?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }

    Ok(())
}
