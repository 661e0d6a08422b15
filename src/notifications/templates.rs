// ABOUTME: Activation email template for newly provisioned tenant administrators
// ABOUTME: Renders subject, HTML, and plain-text bodies with escaped caller-supplied values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

use super::OutboundEmail;
use crate::identity::OneTimePassword;
use html_escape::{encode_double_quoted_attribute, encode_text};
use zeroize::Zeroizing;

/// Values rendered into the activation email
#[derive(Debug)]
pub struct ActivationEmail<'a> {
    /// Recipient address
    pub to: &'a str,
    /// Recipient display name
    pub recipient_name: &'a str,
    /// Community name
    pub tenant_name: &'a str,
    /// Community subdomain
    pub subdomain: &'a str,
    /// Portal sign-in URL
    pub portal_url: &'a str,
    /// One-time password, rendered exactly once per body
    pub password: &'a OneTimePassword,
}

impl ActivationEmail<'_> {
    /// Subject line
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Your {} administrator account is ready", self.tenant_name)
    }

    /// Rich body
    #[must_use]
    pub fn html(&self) -> Zeroizing<String> {
        let name = encode_text(self.recipient_name);
        let tenant = encode_text(self.tenant_name);
        let subdomain = encode_text(self.subdomain);
        let url = encode_double_quoted_attribute(self.portal_url);

        Zeroizing::new(format!(
            r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2933;">
  <h2>Welcome to {tenant}</h2>
  <p>Hello {name},</p>
  <p>An administrator account has been created for you on the <strong>{tenant}</strong> community portal ({subdomain}).</p>
  <table style="margin: 16px 0;">
    <tr><td>Portal:</td><td><a href="{url}">{url}</a></td></tr>
    <tr><td>Temporary password:</td><td><code>{password}</code></td></tr>
  </table>
  <p>Sign in and change this password right away. It will not be sent again.</p>
  <p>If you were not expecting this email, contact your platform operator.</p>
</body>
</html>
"#,
            password = self.password.expose(),
        ))
    }

    /// Plain-text body
    #[must_use]
    pub fn text(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "Welcome to {tenant}\n\n\
             Hello {name},\n\n\
             An administrator account has been created for you on the {tenant} community portal ({subdomain}).\n\n\
             Portal: {url}\n\
             Temporary password: {password}\n\n\
             Sign in and change this password right away. It will not be sent again.\n\
             If you were not expecting this email, contact your platform operator.\n",
            tenant = self.tenant_name,
            name = self.recipient_name,
            subdomain = self.subdomain,
            url = self.portal_url,
            password = self.password.expose(),
        ))
    }

    /// Render into a deliverable message
    #[must_use]
    pub fn render(&self) -> OutboundEmail {
        OutboundEmail {
            to: self.to.to_owned(),
            subject: self.subject(),
            html: self.html(),
            text: self.text(),
        }
    }
}
