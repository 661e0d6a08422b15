// ABOUTME: Provisioning orchestrator sequencing validation, registration, resources, admin, and email
// ABOUTME: Applies the step severity table to decide between clean abort, orphaned tenant, and degraded success
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! Tenant provisioning workflow
//!
//! ```text
//! validate ─► register ─► { properties ∥ gates } ─► admin ─► activation email
//! ```
//!
//! Nothing spans the three collaborators atomically. Once the tenant row
//! commits there is no rollback: a failed admin step leaves an orphaned tenant
//! that [`ProvisioningOrchestrator::retry_admin`] can complete later.

use super::admin_identity::{provision_admin, ProvisionedAdmin};
use super::error::ProvisioningError;
use super::notifier::send_activation;
use super::outcome::{Decision, ProvisioningStage, ProvisioningStep, StepOutcome};
use super::registrar::{build_tenant, register_tenant, RegistrationFailure};
use super::request::{AdminContact, AdminRecoveryRequest, ProvisionTenantRequest};
use super::resources::{configure_gates, import_properties};
use super::result::ProvisioningResult;
use super::subdomain;
use crate::admin::SuperAdmin;
use crate::config::environment::ProvisioningSettings;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::errors::AppError;
use crate::identity::IdentityProvider;
use crate::models::{Tenant, TenantId};
use crate::notifications::{ActivationEmail, EmailTransport};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Where a workflow run has got to
#[derive(Debug)]
struct Progress {
    stage: ProvisioningStage,
    tenant_id: TenantId,
    subdomain: String,
    properties_created: Option<u64>,
    gates_created: Option<u64>,
}

impl Progress {
    fn new(tenant: &Tenant, stage: ProvisioningStage) -> Self {
        Self {
            stage,
            tenant_id: tenant.id,
            subdomain: tenant.subdomain.clone(),
            properties_created: None,
            gates_created: None,
        }
    }

    fn advance(&mut self, step: ProvisioningStep) {
        let next = step.completes();
        if next > self.stage {
            info!(
                tenant_id = %self.tenant_id,
                from = %self.stage,
                to = %next,
                "Provisioning stage advanced"
            );
            self.stage = next;
        }
    }

    fn orphaned(&self, reason: String) -> ProvisioningError {
        ProvisioningError::OrphanedTenant {
            tenant_id: self.tenant_id,
            subdomain: self.subdomain.clone(),
            properties_created: self.properties_created,
            gates_created: self.gates_created,
            reason,
        }
    }

    /// Apply the step's decision to its outcome
    ///
    /// `Ok(None)` means the step failed without a usable value and the workflow continues.
    fn settle<T>(
        &mut self,
        step: ProvisioningStep,
        outcome: StepOutcome<T>,
    ) -> Result<Option<T>, ProvisioningError> {
        let decision = step.decide(outcome.is_ok());
        if let Some(reason) = outcome.reason() {
            warn!(
                tenant_id = %self.tenant_id,
                step = %step,
                stage = %self.stage,
                decision = ?decision,
                reason,
                "Provisioning step failed"
            );
        }

        match decision {
            Decision::Proceed | Decision::Degrade => {
                self.advance(step);
                Ok(outcome.into_value())
            }
            Decision::AbortClean => Err(ProvisioningError::Infrastructure {
                step,
                source: AppError::internal(outcome.reason().unwrap_or_default().to_owned()),
            }),
            Decision::AbortOrphaned => {
                Err(self.orphaned(outcome.reason().unwrap_or_default().to_owned()))
            }
        }
    }
}

/// Drives tenant provisioning across the store, identity service, and email transport
#[derive(Clone)]
pub struct ProvisioningOrchestrator {
    database: Database,
    identity: Arc<dyn IdentityProvider>,
    email: Arc<dyn EmailTransport>,
    settings: ProvisioningSettings,
}

impl ProvisioningOrchestrator {
    /// Create an orchestrator over the given collaborators
    #[must_use]
    pub fn new(
        database: Database,
        identity: Arc<dyn IdentityProvider>,
        email: Arc<dyn EmailTransport>,
        settings: ProvisioningSettings,
    ) -> Self {
        Self {
            database,
            identity,
            email,
            settings,
        }
    }

    /// Store handle
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Workflow tuning
    #[must_use]
    pub const fn settings(&self) -> &ProvisioningSettings {
        &self.settings
    }

    /// Provision a tenant with its properties, gates, and admin head
    ///
    /// # Errors
    /// `Validation` before any write; `Infrastructure` when registration fails;
    /// `OrphanedTenant` when the admin cannot be created after the tenant committed
    #[instrument(
        skip_all,
        fields(operator = %caller.subject(), subdomain = %request.subdomain)
    )]
    pub async fn provision(
        &self,
        caller: &SuperAdmin,
        request: ProvisionTenantRequest,
    ) -> Result<ProvisioningResult, ProvisioningError> {
        info!(
            properties = request.properties.len(),
            gates = request.gates.len(),
            "Tenant provisioning requested"
        );

        request.validate().map_err(ProvisioningError::Validation)?;

        let normalized = match subdomain::validate(&self.database, &request.subdomain).await {
            Ok(Ok(normalized)) => normalized,
            Ok(Err(rejection)) => return Err(ProvisioningError::Validation(rejection.into())),
            Err(source) => {
                return Err(ProvisioningError::Infrastructure {
                    step: ProvisioningStep::ValidateSubdomain,
                    source,
                })
            }
        };

        let tenant = build_tenant(&request, &normalized);
        match register_tenant(&self.database, &tenant).await {
            Ok(_) => {}
            Err(RegistrationFailure::Duplicate(rejection)) => {
                return Err(ProvisioningError::Validation(rejection.into()))
            }
            Err(RegistrationFailure::Store(source)) => {
                return Err(ProvisioningError::Infrastructure {
                    step: ProvisioningStep::RegisterTenant,
                    source,
                })
            }
        }

        let mut progress = Progress::new(&tenant, ProvisioningStage::Validating);
        progress.advance(ProvisioningStep::RegisterTenant);

        let batch_size = self.settings.resource_batch_size;
        let (properties, gates) = tokio::join!(
            import_properties(&self.database, tenant.id, &request.properties, batch_size),
            configure_gates(&self.database, tenant.id, &request.gates, batch_size),
        );
        progress.properties_created = Some(
            progress
                .settle(ProvisioningStep::ImportProperties, properties)?
                .unwrap_or(0),
        );
        progress.gates_created = Some(
            progress
                .settle(ProvisioningStep::ConfigureGates, gates)?
                .unwrap_or(0),
        );

        let contact = request.admin_contact();
        let (admin, activation_email_sent) = self
            .admin_and_activation(&mut progress, &tenant, &contact)
            .await?;

        info!(
            tenant_id = %tenant.id,
            admin_user_id = %admin.user_id,
            properties_created = progress.properties_created,
            gates_created = progress.gates_created,
            activation_email_sent,
            "Tenant provisioning complete"
        );

        Ok(ProvisioningResult {
            success: true,
            tenant_id: Some(tenant.id),
            subdomain: Some(tenant.subdomain),
            admin_user_id: Some(admin.user_id),
            properties_created: progress.properties_created,
            gates_created: progress.gates_created,
            activation_email_sent: Some(activation_email_sent),
            error: None,
            error_code: None,
        })
    }

    /// Create the admin head for an existing tenant that has none
    ///
    /// # Errors
    /// `TenantNotFound`, `AdminAlreadyExists`, `RecoveryLookup` when the tenant
    /// cannot be read, `Validation`, or `OrphanedTenant` when the identity step
    /// fails again
    #[instrument(skip_all, fields(operator = %caller.subject(), tenant_id = %tenant_id))]
    pub async fn retry_admin(
        &self,
        caller: &SuperAdmin,
        tenant_id: TenantId,
        request: AdminRecoveryRequest,
    ) -> Result<ProvisioningResult, ProvisioningError> {
        request.validate().map_err(ProvisioningError::Validation)?;

        let lookup_failed = |source| ProvisioningError::RecoveryLookup { tenant_id, source };

        let tenant = self
            .database
            .get_tenant(tenant_id)
            .await
            .map_err(lookup_failed)?
            .ok_or(ProvisioningError::TenantNotFound(tenant_id))?;

        if self
            .database
            .get_admin_profile_for_tenant(tenant_id)
            .await
            .map_err(lookup_failed)?
            .is_some()
        {
            return Err(ProvisioningError::AdminAlreadyExists(tenant_id));
        }

        let mut progress = Progress::new(&tenant, ProvisioningStage::ResourcesPopulated);
        progress.properties_created =
            self.stored_count(self.database.count_properties(tenant_id).await);
        progress.gates_created = self.stored_count(self.database.count_gates(tenant_id).await);

        info!(subdomain = %tenant.subdomain, "Retrying admin provisioning for orphaned tenant");

        let contact = request.admin_contact();
        let (admin, activation_email_sent) = self
            .admin_and_activation(&mut progress, &tenant, &contact)
            .await?;

        Ok(ProvisioningResult {
            success: true,
            tenant_id: Some(tenant.id),
            subdomain: Some(tenant.subdomain),
            admin_user_id: Some(admin.user_id),
            properties_created: progress.properties_created,
            gates_created: progress.gates_created,
            activation_email_sent: Some(activation_email_sent),
            error: None,
            error_code: None,
        })
    }

    /// Identity step followed by the activation email
    async fn admin_and_activation(
        &self,
        progress: &mut Progress,
        tenant: &Tenant,
        contact: &AdminContact,
    ) -> Result<(ProvisionedAdmin, bool), ProvisioningError> {
        let outcome = provision_admin(
            &self.database,
            self.identity.as_ref(),
            tenant.id,
            contact,
            self.settings.one_time_password_length,
        )
        .await;
        let Some(admin) = progress.settle(ProvisioningStep::ProvisionAdmin, outcome)? else {
            return Err(progress.orphaned("identity step returned no account".to_owned()));
        };

        let portal_url = self.settings.portal.portal_url(&tenant.subdomain);
        let recipient_name = contact.display_name();
        let activation = ActivationEmail {
            to: &admin.email,
            recipient_name: &recipient_name,
            tenant_name: &tenant.name,
            subdomain: &tenant.subdomain,
            portal_url: &portal_url,
            password: &admin.password,
        };
        let sent = progress
            .settle(
                ProvisioningStep::SendActivation,
                send_activation(self.email.as_ref(), &activation).await,
            )?
            .is_some();

        progress.stage = ProvisioningStage::Complete;
        info!(tenant_id = %tenant.id, stage = %progress.stage, "Provisioning stage advanced");
        Ok((admin, sent))
    }

    fn stored_count(&self, count: Result<i64, AppError>) -> Option<u64> {
        match count {
            Ok(n) => u64::try_from(n).ok(),
            Err(e) => {
                warn!(
                    error = %e,
                    backend = self.database.backend_info(),
                    "Could not count tenant resources"
                );
                None
            }
        }
    }
}
