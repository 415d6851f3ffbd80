//! Integration tests for the Odoo REST gateway.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the gateway against a backend with demo data
//! cargo run -p odoo-gateway
//!
//! # Run integration tests
//! cargo test -p odoo-gateway-integration-tests -- --ignored
//! ```
//!
//! The suite drives a running gateway over HTTP; every test is `#[ignore]`d
//! so `cargo test` stays green without a live backend.

use reqwest::Client;

/// Base URL for the gateway (configurable via environment).
#[must_use]
pub fn gateway_base_url() -> String {
    std::env::var("GATEWAY_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Build the HTTP client used by the suite.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn http_client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
