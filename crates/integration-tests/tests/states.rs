//! Integration tests for the states endpoint.
//!
//! Run with: cargo test -p odoo-gateway-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use odoo_gateway_integration_tests::{gateway_base_url, http_client};

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_states_list() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .get(format!("{base_url}/states"))
        .send()
        .await
        .expect("Failed to list states");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_states_name_filter() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .get(format!("{base_url}/states?name=ontario"))
        .send()
        .await
        .expect("Failed to filter states");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let states = body.as_array().expect("array");

    // ilike: case-insensitive substring match
    for state in states {
        let name = state.get("name").and_then(Value::as_str).expect("name");
        assert!(name.to_lowercase().contains("ontario"));
    }
}

#[tokio::test]
#[ignore = "Requires running gateway and backend credentials"]
async fn test_states_id_filter() {
    let client = http_client();
    let base_url = gateway_base_url();

    let resp = client
        .get(format!("{base_url}/states?id=1"))
        .send()
        .await
        .expect("Failed to filter states");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let states = body.as_array().expect("array");
    assert!(states.len() <= 1);
}
