//! Odoo REST gateway library.
//!
//! A small HTTP façade in front of an Odoo backend: route handlers
//! validate JSON bodies, a thin JSON-RPC client talks to the backend, and
//! the services translate human-friendly location names into the
//! backend's numeric identifiers. The gateway holds no state of its own —
//! it is a stateless translator, not a store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
