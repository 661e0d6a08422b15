// ABOUTME: Tests for activation email rendering
// ABOUTME: Password placement, HTML escaping of caller values, and subject hygiene
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use gatehouse_server::identity::OneTimePassword;
use gatehouse_server::notifications::ActivationEmail;

#[test]
fn test_password_appears_once_per_body() {
    let password = OneTimePassword::generate(16).unwrap();
    let email = ActivationEmail {
        to: "head@example.com",
        recipient_name: "Ana Cruz",
        tenant_name: "Sunset Ridge",
        subdomain: "sunset-ridge",
        portal_url: "https://sunset-ridge.gatehouse.app",
        password: &password,
    }
    .render();

    assert_eq!(email.to, "head@example.com");
    assert_eq!(email.html.matches(password.expose()).count(), 1);
    assert_eq!(email.text.matches(password.expose()).count(), 1);
    assert!(!email.subject.contains(password.expose()));
    assert!(email.subject.contains("Sunset Ridge"));

    for body in [email.html.as_str(), email.text.as_str()] {
        assert!(body.contains("Ana Cruz"));
        assert!(body.contains("sunset-ridge"));
        assert!(body.contains("https://sunset-ridge.gatehouse.app"));
    }
}

#[test]
fn test_caller_values_are_escaped_in_html() {
    let password = OneTimePassword::generate(16).unwrap();
    let email = ActivationEmail {
        to: "head@example.com",
        recipient_name: "<script>alert(1)</script>",
        tenant_name: "Oak & Pine",
        subdomain: "oak-pine",
        portal_url: "https://oak-pine.gatehouse.app",
        password: &password,
    }
    .render();

    assert!(!email.html.contains("<script>"));
    assert!(email.html.contains("&lt;script&gt;"));
    assert!(email.html.contains("Oak &amp; Pine"));
    assert!(email.text.contains("Oak & Pine"));
}

#[test]
fn test_debug_output_omits_bodies() {
    let password = OneTimePassword::generate(16).unwrap();
    let email = ActivationEmail {
        to: "head@example.com",
        recipient_name: "Ana Cruz",
        tenant_name: "Sunset Ridge",
        subdomain: "sunset-ridge",
        portal_url: "https://sunset-ridge.gatehouse.app",
        password: &password,
    }
    .render();

    let debug = format!("{email:?}");
    assert!(!debug.contains(password.expose()));
    assert!(debug.contains("head@example.com"));
}
