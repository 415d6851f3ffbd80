//! Integration tests for the customer endpoints.
//!
//! These tests require:
//! - A running gateway (cargo run -p odoo-gateway)
//! - A reachable Odoo backend with standard demo data (Canada/Ontario etc.)
//!
//! Run with: cargo test -p odoo-gateway-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use odoo_gateway_integration_tests::{gateway_base_url, http_client};

/// Unique email so repeated runs don't trip the duplicate check.
fn unique_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

// ============================================================================
// List & Search Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_list() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .get(format!("{base_url}/customers"))
        .send()
        .await
        .expect("Failed to list customers");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_search_requires_name() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .get(format!("{base_url}/customers/search"))
        .send()
        .await
        .expect("Failed to call search");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body.get("status"), Some(&json!("error")));
    assert_eq!(body.get("message"), Some(&json!("Missing 'name' query parameter")));
}

// ============================================================================
// Creation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_create_returns_integer_id() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .post(format!("{base_url}/customers"))
        .json(&json!({
            "name": "Integration Test",
            "email": unique_email(),
            "state": "Ontario",
            "country": "Canada"
        }))
        .send()
        .await
        .expect("Failed to create customer");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body.get("status"), Some(&json!("successfully created")));
    assert!(body.get("customer_id").and_then(Value::as_i64).is_some());
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_create_requires_contact() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .post(format!("{base_url}/customers"))
        .json(&json!({"name": "No Contact"}))
        .send()
        .await
        .expect("Failed to call create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(
        body.get("message"),
        Some(&json!("Either phone or email must be provided."))
    );
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_create_duplicate_email_conflicts() {
    let client = http_client();
    let base_url = gateway_base_url();
    let email = unique_email();

    let resp = client
        .post(format!("{base_url}/customers"))
        .json(&json!({"name": "First", "email": email}))
        .send()
        .await
        .expect("Failed to create first customer");
    assert_eq!(resp.status(), StatusCode::OK);

    // Same email, different phone: still blocked
    let resp = client
        .post(format!("{base_url}/customers"))
        .json(&json!({"name": "Second", "email": email, "phone": "555-0199"}))
        .send()
        .await
        .expect("Failed to call create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(
        body.get("message"),
        Some(&json!("A customer with this email or phone number already exists"))
    );
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_create_unknown_country_is_bad_request() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .post(format!("{base_url}/customers"))
        .json(&json!({
            "name": "Lost",
            "email": unique_email(),
            "country": "Wrongland"
        }))
        .send()
        .await
        .expect("Failed to call create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Bulk Creation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_bulk_create_rejects_non_list() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .post(format!("{base_url}/customers/bulk_create"))
        .json(&json!({"name": "Not A List", "email": unique_email()}))
        .send()
        .await
        .expect("Failed to call bulk create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(
        body.get("message"),
        Some(&json!("Input must be a list of customer data."))
    );
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_bulk_create_partial_failure_keeps_prior_items() {
    let client = http_client();
    let base_url = gateway_base_url();
    let first_email = unique_email();

    // Item B carries an unresolvable country: it fails during creation,
    // after A is committed and before C is attempted
    let resp = client
        .post(format!("{base_url}/customers/bulk_create"))
        .json(&json!([
            {"name": "Bulk A", "email": first_email},
            {"name": "Bulk B", "email": unique_email(), "country": "Wrongland"},
            {"name": "Bulk C", "email": unique_email()}
        ]))
        .send()
        .await
        .expect("Failed to call bulk create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    // The error reports the failure; it does not claim A was rolled back
    assert_eq!(body.get("status"), Some(&json!("error")));

    // A is committed: searching by its name finds it
    let resp = client
        .get(format!("{base_url}/customers/search?name=Bulk A"))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Value = resp.json().await.expect("Failed to parse response");
    assert!(!found.as_array().expect("array").is_empty());
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_update_unknown_id_is_not_found() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .patch(format!("{base_url}/customers"))
        .json(&json!({"id": 999_999_999, "values": {"phone": "555-0100"}}))
        .send()
        .await
        .expect("Failed to call update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body.get("message"), Some(&json!("Customer not found.")));
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_update_unknown_country_is_bad_request() {
    let client = http_client();
    let base_url = gateway_base_url();

    // Create a target first
    let resp = client
        .post(format!("{base_url}/customers"))
        .json(&json!({"name": "Update Target", "email": unique_email()}))
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let id = body
        .get("customer_id")
        .and_then(Value::as_i64)
        .expect("customer id");

    let resp = client
        .patch(format!("{base_url}/customers"))
        .json(&json!({"id": id, "values": {"country": "Wrongland"}}))
        .send()
        .await
        .expect("Failed to call update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_customer_update_malformed_body() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .patch(format!("{base_url}/customers"))
        .json(&json!({"id": 1}))
        .send()
        .await
        .expect("Failed to call update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
