//! Odoo backend client (JSON-RPC).
//!
//! # Architecture
//!
//! - One authentication round trip at startup; the returned uid is reused
//!   for the process lifetime (no re-authentication on expiry)
//! - One network round trip per `execute` call; no batching, no retries
//! - RPC faults propagate to the caller unmodified
//!
//! # Example
//!
//! ```rust,ignore
//! use odoo_gateway::backend::BackendClient;
//!
//! let client = BackendClient::connect(&config.odoo).await?;
//!
//! // Search partner ids by email
//! let ids = client
//!     .search("res.partner", vec![domain::eq("email", "x@y.com")])
//!     .await?;
//! ```

mod client;
pub mod domain;

pub use client::BackendClient;

use thiserror::Error;

/// Errors that can occur when talking to the Odoo backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned an RPC fault.
    #[error("RPC fault ({code}): {message}")]
    Rpc {
        /// Fault code from the JSON-RPC error object.
        code: i64,
        /// Human-readable fault message.
        message: String,
    },

    /// Authentication was rejected.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Failed to decode a result payload.
    #[error("Decode error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response envelope was not a valid JSON-RPC response.
    #[error("Malformed RPC response: {0}")]
    Protocol(String),
}
