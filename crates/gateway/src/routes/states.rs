//! Geographic reference data route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{backend::domain, error::ApiError, state::AppState};

/// Backend model holding state records.
const STATE_MODEL: &str = "res.country.state";

/// Build the states router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Filter query parameters.
#[derive(Debug, Deserialize)]
pub struct StatesQuery {
    pub name: Option<String>,
    pub id: Option<i64>,
}

/// List states, optionally filtered by name substring and/or exact id.
///
/// # Errors
///
/// Returns `ApiError::Backend` if the lookup fails.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<StatesQuery>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let mut conditions = Vec::new();
    if let Some(name) = &query.name {
        conditions.push(domain::ilike("name", name.as_str()));
    }
    if let Some(id) = query.id {
        conditions.push(domain::eq("id", id));
    }

    let states = state
        .backend()
        .search_read(STATE_MODEL, conditions, &["id", "name", "country_id"])
        .await?;

    Ok(Json(states))
}
