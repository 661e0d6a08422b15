// ABOUTME: Identity provisioner creating the tenant's admin head
// ABOUTME: Generates the one-time password, creates the identity account, and records the admin profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::outcome::StepOutcome;
use super::request::AdminContact;
use crate::constants::roles;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::identity::{IdentityProvider, NewAdminAccount, OneTimePassword};
use crate::models::{AdminProfile, TenantId};
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

/// Administrator created for a tenant
#[derive(Debug)]
pub struct ProvisionedAdmin {
    /// Identity-service account id
    pub user_id: Uuid,
    /// Confirmed login email
    pub email: String,
    /// Initial credential, delivered only by the activation email
    pub password: OneTimePassword,
}

/// Create the admin head account and profile for `tenant_id`
pub async fn provision_admin(
    database: &Database,
    identity: &dyn IdentityProvider,
    tenant_id: TenantId,
    contact: &AdminContact,
    password_length: usize,
) -> StepOutcome<ProvisionedAdmin> {
    let password = match OneTimePassword::generate(password_length) {
        Ok(password) => password,
        Err(e) => return StepOutcome::HardFail(e.to_string()),
    };

    let account = NewAdminAccount {
        email: &contact.email,
        password: &password,
        tenant_id,
        role: roles::ADMIN_HEAD,
        first_name: &contact.first_name,
        last_name: &contact.last_name,
        phone: contact.phone.as_deref(),
        position: contact.position.as_deref(),
    };

    let created = match identity.create_admin_account(&account).await {
        Ok(created) => created,
        Err(e) => {
            error!(tenant_id = %tenant_id, error = %e, "Identity account creation failed");
            return StepOutcome::HardFail(e.to_string());
        }
    };

    let profile = AdminProfile {
        user_id: created.id,
        tenant_id,
        role: roles::ADMIN_HEAD.to_owned(),
        email: created.email.clone(),
        first_name: contact.first_name.clone(),
        last_name: contact.last_name.clone(),
        phone: contact.phone.clone(),
        position: contact.position.clone(),
        created_at: Utc::now(),
    };

    if let Err(e) = database.create_admin_profile(&profile).await {
        error!(
            tenant_id = %tenant_id,
            user_id = %created.id,
            error = %e,
            "Identity account exists but admin profile insert failed"
        );
        return StepOutcome::HardFail(format!(
            "identity account {} created but admin profile was not recorded: {e}",
            created.id
        ));
    }

    info!(tenant_id = %tenant_id, user_id = %created.id, "Admin head provisioned");
    StepOutcome::Ok(ProvisionedAdmin {
        user_id: created.id,
        email: created.email,
        password,
    })
}
