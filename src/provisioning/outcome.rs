// ABOUTME: Step results, failure severities, and workflow stages for tenant provisioning
// ABOUTME: Static severity table and the continue/abort decision derived from it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Workflow step vocabulary
//!
//! Every collaborator call returns a [`StepOutcome`]. Whether a failure stops
//! the workflow is not decided at the call site: it is looked up from
//! [`ProvisioningStep::severity`] and combined with the stage the workflow has
//! reached, see [`ProvisioningStep::decide`].

use serde::Serialize;
use std::fmt;

/// Result of running one provisioning step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    /// Step completed
    Ok(T),
    /// Step partly failed; `salvaged` is what landed anyway
    SoftFail {
        /// Failure description for logs and results
        reason: String,
        /// Partial value produced before or despite the failure
        salvaged: T,
    },
    /// Step produced nothing usable
    HardFail(String),
}

impl<T> StepOutcome<T> {
    /// Whether the step fully succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Failure reason, if any
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::SoftFail { reason, .. } | Self::HardFail(reason) => Some(reason),
        }
    }

    /// Value the workflow can continue with, if one exists
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Ok(value) | Self::SoftFail { salvaged: value, .. } => Some(value),
            Self::HardFail(_) => None,
        }
    }
}

/// How much a step's failure matters to the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Failure ends the workflow
    Fatal,
    /// Failure is logged and the workflow continues
    NonFatal,
}

/// Progress markers, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningStage {
    /// Checking authorization and input
    Validating,
    /// Tenant row committed
    TenantCreated,
    /// Property and gate imports attempted
    ResourcesPopulated,
    /// Administrator account and profile exist
    AdminProvisioned,
    /// Activation email attempted
    Notified,
    /// Workflow finished
    Complete,
}

impl ProvisioningStage {
    /// Whether durable state exists that a failure would leave behind
    #[must_use]
    pub const fn is_past_point_of_no_return(self) -> bool {
        !matches!(self, Self::Validating)
    }

    /// Stable name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::TenantCreated => "tenant_created",
            Self::ResourcesPopulated => "resources_populated",
            Self::AdminProvisioned => "admin_provisioned",
            Self::Notified => "notified",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ProvisioningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The individual steps of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningStep {
    /// Subdomain format and availability
    ValidateSubdomain,
    /// Tenant row insert
    RegisterTenant,
    /// Property bulk insert
    ImportProperties,
    /// Gate bulk insert
    ConfigureGates,
    /// Identity account plus admin profile
    ProvisionAdmin,
    /// Activation email
    SendActivation,
}

/// What the orchestrator does after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Step succeeded
    Proceed,
    /// Step failed but the workflow continues with reduced results
    Degrade,
    /// Stop; nothing durable was written
    AbortClean,
    /// Stop; a tenant exists without an administrator
    AbortOrphaned,
}

impl ProvisioningStep {
    /// Failure severity of this step
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::ValidateSubdomain | Self::RegisterTenant | Self::ProvisionAdmin => {
                Severity::Fatal
            }
            Self::ImportProperties | Self::ConfigureGates | Self::SendActivation => {
                Severity::NonFatal
            }
        }
    }

    /// Stage the workflow is in while this step runs
    #[must_use]
    pub const fn runs_in(self) -> ProvisioningStage {
        match self {
            Self::ValidateSubdomain | Self::RegisterTenant => ProvisioningStage::Validating,
            Self::ImportProperties | Self::ConfigureGates => ProvisioningStage::TenantCreated,
            Self::ProvisionAdmin => ProvisioningStage::ResourcesPopulated,
            Self::SendActivation => ProvisioningStage::AdminProvisioned,
        }
    }

    /// Stage reached once this step has run
    #[must_use]
    pub const fn completes(self) -> ProvisioningStage {
        match self {
            Self::ValidateSubdomain => ProvisioningStage::Validating,
            Self::RegisterTenant => ProvisioningStage::TenantCreated,
            Self::ImportProperties | Self::ConfigureGates => ProvisioningStage::ResourcesPopulated,
            Self::ProvisionAdmin => ProvisioningStage::AdminProvisioned,
            Self::SendActivation => ProvisioningStage::Notified,
        }
    }

    /// Stable name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidateSubdomain => "validate_subdomain",
            Self::RegisterTenant => "register_tenant",
            Self::ImportProperties => "import_properties",
            Self::ConfigureGates => "configure_gates",
            Self::ProvisionAdmin => "provision_admin",
            Self::SendActivation => "send_activation",
        }
    }

    /// Continue/abort decision for a step that ran in its usual stage
    #[must_use]
    pub const fn decide(self, succeeded: bool) -> Decision {
        if succeeded {
            return Decision::Proceed;
        }
        match (self.severity(), self.runs_in().is_past_point_of_no_return()) {
            (Severity::NonFatal, _) => Decision::Degrade,
            (Severity::Fatal, false) => Decision::AbortClean,
            (Severity::Fatal, true) => Decision::AbortOrphaned,
        }
    }
}

impl fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
