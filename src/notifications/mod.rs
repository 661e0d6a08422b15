// ABOUTME: Outbound email abstraction for activation notifications
// ABOUTME: EmailTransport trait, message type, transports, and templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

/// HTTP and log-only transports
pub mod email;
/// Activation message rendering
pub mod templates;

pub use email::{HttpEmailTransport, LogEmailTransport};
pub use templates::ActivationEmail;

use crate::errors::AppResult;
use async_trait::async_trait;
use std::fmt;
use zeroize::Zeroizing;

/// A rendered email ready for delivery
///
/// Bodies may carry credentials, so they are zeroized on drop and omitted from `Debug`.
pub struct OutboundEmail {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Rich body
    pub html: Zeroizing<String>,
    /// Plain-text body
    pub text: Zeroizing<String>,
}

impl fmt::Debug for OutboundEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundEmail")
            .field("to", &self.to)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

/// Delivers rendered emails
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Send one message
    async fn send(&self, email: &OutboundEmail) -> AppResult<()>;
}
