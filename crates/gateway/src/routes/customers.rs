//! Customer record route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{
    backend::domain,
    error::ApiError,
    services::customers::{self, CUSTOMER_FIELDS, CUSTOMER_MODEL, NewCustomer},
    state::AppState,
};

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create).patch(update))
        .route("/search", get(search))
        .route("/bulk_create", post(bulk_create))
}

/// Name filter query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

/// Response for a successful creation.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub status: &'static str,
    pub customer_id: i64,
}

/// Response for a successful bulk creation.
#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
    pub status: &'static str,
    pub customer_ids: Vec<i64>,
}

/// Response for a successful update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub status: &'static str,
}

/// List all customer records.
///
/// # Errors
///
/// Returns `ApiError::Backend` if the lookup fails.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let records = state
        .backend()
        .search_read(CUSTOMER_MODEL, vec![], CUSTOMER_FIELDS)
        .await?;

    tracing::info!(count = records.len(), "Fetched all customers");
    Ok(Json(records))
}

/// Search customer records by name substring.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` when the `name` parameter is missing.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let name = query
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Missing 'name' query parameter".to_string()))?;

    let records = state
        .backend()
        .search_read(
            CUSTOMER_MODEL,
            vec![domain::ilike("name", name)],
            CUSTOMER_FIELDS,
        )
        .await?;

    tracing::info!(name, count = records.len(), "Searched customers");
    Ok(Json(records))
}

/// Create a customer record.
///
/// The duplicate check runs here, before the shaper is invoked: an
/// existing record matching the given email OR phone blocks creation.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on a failed precondition or
/// resolution, `ApiError::Conflict` on a duplicate.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewCustomer>,
) -> Result<Json<CreateResponse>, ApiError> {
    body.validate()?;

    check_duplicate(&state, body.email.as_deref(), body.phone.as_deref()).await?;

    let customer_id = customers::create(state.backend(), &body).await?;

    tracing::info!(customer_id, "Customer created");
    Ok(Json(CreateResponse {
        status: "successfully created",
        customer_id,
    }))
}

/// Update one existing customer record.
///
/// The body must be a JSON object with `id` and `values` keys; the target
/// must exist before any resolution or write happens.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on a malformed body or failed
/// resolution, `ApiError::NotFound` for an unknown id.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let (id, values) = parse_update_body(&body)?;

    let existing = state
        .backend()
        .search(CUSTOMER_MODEL, vec![domain::eq("id", id)])
        .await?;
    if existing.is_empty() {
        return Err(ApiError::NotFound("Customer not found.".to_string()));
    }

    customers::update(state.backend(), id, values).await?;

    tracing::info!(customer_id = id, "Customer updated");
    Ok(Json(UpdateResponse {
        status: "successfully updated",
    }))
}

/// Create several customer records.
///
/// The whole batch is shape-validated up front; creations then run
/// sequentially and independently. A mid-batch failure leaves prior items
/// committed — there is no rollback.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` when the body is not a list or an item
/// fails validation.
#[instrument(skip(state, body))]
pub async fn bulk_create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<BulkCreateResponse>, ApiError> {
    let items = body.as_array().ok_or_else(|| {
        ApiError::InvalidInput("Input must be a list of customer data.".to_string())
    })?;

    // Shape validation for every item before the first create call
    let mut batch = Vec::with_capacity(items.len());
    for item in items {
        let customer: NewCustomer = serde_json::from_value(item.clone())
            .ok()
            .filter(|c: &NewCustomer| !c.name.is_empty() && c.validate().is_ok())
            .ok_or_else(|| {
                ApiError::InvalidInput(
                    "Each customer must include 'name' and either 'phone' or 'email'.".to_string(),
                )
            })?;
        batch.push(customer);
    }

    // Each create is an independent, unguarded call; earlier ids stay
    // committed if a later one fails
    let mut customer_ids = Vec::with_capacity(batch.len());
    for customer in &batch {
        let id = customers::create(state.backend(), customer).await?;
        customer_ids.push(id);
    }

    tracing::info!(count = customer_ids.len(), "Bulk created customers");
    Ok(Json(BulkCreateResponse {
        status: "successfully created",
        customer_ids,
    }))
}

/// Duplicate check: an existing record matching email OR phone blocks
/// creation. With both present the conditions are ORed.
async fn check_duplicate(
    state: &AppState,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), ApiError> {
    let mut conditions = Vec::new();
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        conditions.push(domain::eq("email", email));
    }
    if let Some(phone) = phone.filter(|p| !p.is_empty()) {
        conditions.push(domain::eq("phone", phone));
    }

    if conditions.is_empty() {
        return Ok(());
    }

    let existing = state
        .backend()
        .search(CUSTOMER_MODEL, domain::any_of(conditions))
        .await?;

    if existing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Conflict(
            "A customer with this email or phone number already exists".to_string(),
        ))
    }
}

fn parse_update_body(body: &Value) -> Result<(i64, &Map<String, Value>), ApiError> {
    let malformed = || {
        ApiError::InvalidInput(
            "Invalid input. The request must include a JSON object with \"id\" and \"values\" keys."
                .to_string(),
        )
    };

    let object = body.as_object().ok_or_else(malformed)?;
    let id = object.get("id").and_then(Value::as_i64).ok_or_else(malformed)?;
    let values = object
        .get("values")
        .and_then(Value::as_object)
        .ok_or_else(malformed)?;

    Ok((id, values))
}
