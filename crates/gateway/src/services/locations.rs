//! Name-to-identifier resolution for geographic reference data.
//!
//! Resolution is always an exact-name lookup against the backend; nothing
//! is cached, every call issues fresh queries. When several records share
//! a name the first one the backend returns wins — the ordering is
//! backend-defined and not a guarantee of this module.

use thiserror::Error;
use tracing::instrument;

use crate::backend::{BackendClient, BackendError, domain};

/// Errors from a name resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No record matches the supplied name.
    #[error("{0}")]
    NotFound(String),

    /// Backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Resolve a country name to its backend id.
///
/// # Errors
///
/// Returns `ResolveError::NotFound` when no country matches the name.
#[instrument(skip(client))]
pub async fn country_id(client: &BackendClient, name: &str) -> Result<i64, ResolveError> {
    let records = client
        .search_read("res.country", vec![domain::eq("name", name)], &["id"])
        .await?;

    records
        .first()
        .and_then(|record| record.get("id"))
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| ResolveError::NotFound(format!("Country '{name}' not found")))
}

/// Resolve a state name to its backend id, optionally scoped to a country.
///
/// Resolving the country first and scoping the state lookup to it keeps a
/// duplicate state name in another country from being picked up.
///
/// # Errors
///
/// Returns `ResolveError::NotFound` when the country (if supplied) or the
/// state does not match; the message names the country when one was given.
#[instrument(skip(client))]
pub async fn state_id(
    client: &BackendClient,
    name: &str,
    country: Option<&str>,
) -> Result<i64, ResolveError> {
    let mut conditions = vec![domain::eq("name", name)];

    if let Some(country_name) = country {
        let country_ids = client
            .search("res.country", vec![domain::eq("name", country_name)])
            .await?;
        let scope_id = *country_ids.first().ok_or_else(|| {
            ResolveError::NotFound(format!("Country '{country_name}' not found"))
        })?;
        conditions.push(domain::eq("country_id", scope_id));
    }

    let records = client
        .search_read("res.country.state", conditions, &["id"])
        .await?;

    records
        .first()
        .and_then(|record| record.get("id"))
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| {
            let scope = country
                .map(|c| format!(" in country '{c}'"))
                .unwrap_or_default();
            ResolveError::NotFound(format!("State '{name}' not found{scope}"))
        })
}
