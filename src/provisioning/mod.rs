// ABOUTME: Tenant provisioning workflow module organization and exports
// ABOUTME: Validator, registrar, resource importers, identity provisioner, notifier, and orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Tenant provisioning
//!
//! Creates a community, its properties and gates, and its first administrator
//! across three independently failing collaborators: the relational store,
//! the identity service, and the email transport.

/// Identity provisioner
pub mod admin_identity;
/// Workflow error taxonomy
pub mod error;
/// Notification dispatcher
pub mod notifier;
/// Workflow sequencing
pub mod orchestrator;
/// Step results and the severity table
pub mod outcome;
/// Tenant row insert
pub mod registrar;
/// Request bodies and field validation
pub mod request;
/// Property importer and gate configurator
pub mod resources;
/// Response shape
pub mod result;
/// Subdomain validator
pub mod subdomain;

pub use error::ProvisioningError;
pub use orchestrator::ProvisioningOrchestrator;
pub use outcome::{Decision, ProvisioningStage, ProvisioningStep, Severity, StepOutcome};
pub use request::{AdminContact, AdminRecoveryRequest, ProvisionTenantRequest};
pub use result::ProvisioningResult;
pub use subdomain::SubdomainRejection;
