//! HTTP route handlers for the gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//!
//! # Customers
//! GET   /customers              - List all customer records
//! GET   /customers/search?name= - Search customers by name
//! POST  /customers              - Create a customer
//! PATCH /customers              - Update one customer ({"id", "values"})
//! POST  /customers/bulk_create  - Create several customers
//!
//! # States
//! GET  /states?name=&id=        - Geographic reference lookup
//! ```

use axum::Router;

use crate::state::AppState;

pub mod customers;
pub mod states;

/// Build the gateway router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/states", states::router())
}
