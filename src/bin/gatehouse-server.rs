// ABOUTME: Gatehouse server binary serving the platform provisioning API
// ABOUTME: Loads environment configuration, connects the store, and starts the HTTP listener
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! # Gatehouse Server Binary
//!
//! Starts the platform console API used to provision new communities.

use anyhow::{Context, Result};
use clap::Parser;
use gatehouse_server::{
    config::environment::{DatabaseUrl, ServerConfig},
    constants::routes,
    database_plugins::{factory::Database, DatabaseProvider},
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "gatehouse-server")]
#[command(about = "Gatehouse - tenant provisioning API for community management")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Gatehouse server");
    info!("{}", config.summary());

    if let DatabaseUrl::SQLite { path } = &config.database_url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }

    let database = Database::new(&config.database_url.to_connection_string()).await?;
    info!(
        "Database initialized successfully: {}",
        database.backend_info()
    );

    let resources = Arc::new(ServerResources::from_config(database, &config)?);

    display_available_endpoints(&config);

    if let Err(e) = server::run(resources, &config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display the platform API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);
    info!("=== Available API Endpoints ===");
    info!("   Health:             GET  {base}{}", routes::HEALTH);
    info!("   Provision Tenant:   POST {base}{}", routes::PLATFORM_TENANTS);
    info!("   Retry Admin:        POST {base}{}", routes::PLATFORM_TENANT_ADMIN);
    info!(
        "   Subdomain Check:    GET  {base}{}",
        routes::PLATFORM_SUBDOMAIN_AVAILABILITY
    );
    info!("=== End of Endpoint List ===");
}
