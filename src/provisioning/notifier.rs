// ABOUTME: Notification dispatcher sending the activation email to a new admin head
// ABOUTME: Delivery failures are reported as a step outcome and never abort provisioning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::outcome::StepOutcome;
use crate::notifications::{ActivationEmail, EmailTransport};
use tracing::{info, warn};

/// Render and send the activation email
pub async fn send_activation(
    transport: &dyn EmailTransport,
    activation: &ActivationEmail<'_>,
) -> StepOutcome<()> {
    let email = activation.render();

    match transport.send(&email).await {
        Ok(()) => {
            info!(subdomain = %activation.subdomain, "Activation email sent");
            StepOutcome::Ok(())
        }
        Err(e) => {
            warn!(
                subdomain = %activation.subdomain,
                error = %e,
                "Activation email failed; credentials must be delivered out of band"
            );
            StepOutcome::HardFail(e.to_string())
        }
    }
}
