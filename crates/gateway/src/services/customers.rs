//! Customer record shaping, creation, and update merging.
//!
//! The shaper turns caller-facing fields (`state`/`country` names) into the
//! backend's field set (`state_id`/`country_id`) and drops empty values —
//! the backend treats an omitted field differently from an explicitly
//! empty one.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{
    backend::BackendClient,
    error::ApiError,
    services::locations::{self, ResolveError},
};

/// Backend model holding customer records.
pub const CUSTOMER_MODEL: &str = "res.partner";

/// Fields returned by customer read endpoints.
pub const CUSTOMER_FIELDS: &[&str] = &[
    "name",
    "phone",
    "email",
    "street",
    "street2",
    "city",
    "zip",
    "state_id",
    "country_id",
];

/// Caller-facing fields for creating a customer.
///
/// `state` and `country` are human-readable names; they never reach the
/// backend directly. A `street2` key on the wire is accepted and dropped,
/// matching the create contract.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl NewCustomer {
    /// Check the contact precondition: at least one of phone/email.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` when both are missing.
    pub fn validate(&self) -> Result<(), ApiError> {
        if non_empty(&self.phone).is_none() && non_empty(&self.email).is_none() {
            return Err(ApiError::InvalidInput(
                "Either phone or email must be provided.".to_string(),
            ));
        }
        Ok(())
    }

    /// Assemble the backend-facing field set.
    ///
    /// Only canonical keys are emitted and empty/absent values are omitted.
    #[must_use]
    pub fn shape(&self, state_id: Option<i64>, country_id: Option<i64>) -> Map<String, Value> {
        let mut record = Map::new();

        let string_fields = [
            ("name", Some(&self.name)),
            ("phone", self.phone.as_ref()),
            ("email", self.email.as_ref()),
            ("street", self.street.as_ref()),
            ("city", self.city.as_ref()),
            ("zip", self.zip.as_ref()),
        ];
        for (key, value) in string_fields {
            if let Some(v) = value
                && !v.is_empty()
            {
                record.insert(key.to_string(), Value::String(v.clone()));
            }
        }

        if let Some(id) = state_id {
            record.insert("state_id".to_string(), Value::from(id));
        }
        if let Some(id) = country_id {
            record.insert("country_id".to_string(), Value::from(id));
        }

        record
    }
}

/// Create a customer record, resolving location names first.
///
/// The contact precondition is checked before any backend call. A state
/// name is only resolved when a country name is also present (scoped to
/// it); a country name alone resolves independently. A name that does not
/// resolve is the caller's fault, not a server fault.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on a failed precondition or
/// resolution, `ApiError::Backend` on backend failure.
#[instrument(skip(client, customer), fields(name = %customer.name))]
pub async fn create(client: &BackendClient, customer: &NewCustomer) -> Result<i64, ApiError> {
    customer.validate()?;

    let state = non_empty(&customer.state);
    let country = non_empty(&customer.country);

    let state_id = match (state, country) {
        (Some(state_name), Some(country_name)) => Some(
            locations::state_id(client, state_name, Some(country_name))
                .await
                .map_err(|e| invalid_location("state", state_name, e))?,
        ),
        _ => None,
    };

    let country_id = match country {
        Some(country_name) => Some(
            locations::country_id(client, country_name)
                .await
                .map_err(|e| invalid_location("country", country_name, e))?,
        ),
        None => None,
    };

    let record = customer.shape(state_id, country_id);
    let id = client
        .create(CUSTOMER_MODEL, Value::Object(record))
        .await?;

    Ok(id)
}

/// Resolve location names inside an update patch.
///
/// Produces a new patch; the caller's map is never mutated. `state` and
/// `country` keys are replaced by `state_id`/`country_id`. State
/// resolution here is name-only, unscoped by a `country` key in the same
/// patch — an asymmetry with the creation path that the update contract
/// keeps.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` when a name value is not a string or
/// does not resolve, `ApiError::Backend` when a lookup fails; nothing is
/// written in either case.
pub async fn resolve_patch(
    client: &BackendClient,
    values: &Map<String, Value>,
) -> Result<Map<String, Value>, ApiError> {
    let mut patch = values.clone();

    if let Some(value) = patch.remove("state") {
        let name = string_value("state", &value)?;
        let id = locations::state_id(client, &name, None)
            .await
            .map_err(|e| invalid_location("state", &name, e))?;
        patch.insert("state_id".to_string(), Value::from(id));
    }

    if let Some(value) = patch.remove("country") {
        let name = string_value("country", &value)?;
        let id = locations::country_id(client, &name)
            .await
            .map_err(|e| invalid_location("country", &name, e))?;
        patch.insert("country_id".to_string(), Value::from(id));
    }

    Ok(patch)
}

/// Apply an update patch to one existing customer.
///
/// Resolution failures abort before the write; there are no partial
/// writes.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on a bad patch, `ApiError::Backend` on
/// backend failure.
#[instrument(skip(client, values))]
pub async fn update(
    client: &BackendClient,
    id: i64,
    values: &Map<String, Value>,
) -> Result<(), ApiError> {
    let patch = resolve_patch(client, values).await?;
    client
        .write(CUSTOMER_MODEL, id, Value::Object(patch))
        .await?;
    Ok(())
}

/// Treat `None` and `""` alike.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn string_value(key: &str, value: &Value) -> Result<String, ApiError> {
    value.as_str().map(String::from).ok_or_else(|| {
        ApiError::InvalidInput(format!("Invalid {key} '{value}': expected a string name"))
    })
}

/// An unresolvable name is the caller's fault; a failed lookup is not.
fn invalid_location(key: &str, name: &str, err: ResolveError) -> ApiError {
    match err {
        ResolveError::NotFound(message) => {
            ApiError::InvalidInput(format!("Invalid {key} '{name}': {message}"))
        }
        ResolveError::Backend(e) => ApiError::Backend(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customer(phone: Option<&str>, email: Option<&str>) -> NewCustomer {
        NewCustomer {
            name: "Jane Doe".to_string(),
            phone: phone.map(String::from),
            email: email.map(String::from),
            street: None,
            city: None,
            zip: None,
            state: None,
            country: None,
        }
    }

    #[test]
    fn test_validate_requires_phone_or_email() {
        assert!(customer(None, None).validate().is_err());
        assert!(customer(Some(""), Some("")).validate().is_err());
        assert!(customer(Some("555-0100"), None).validate().is_ok());
        assert!(customer(None, Some("x@y.com")).validate().is_ok());
        assert!(customer(Some("555-0100"), Some("x@y.com")).validate().is_ok());
    }

    #[test]
    fn test_shape_omits_empty_fields() {
        let mut input = customer(Some("555-0100"), None);
        input.street = Some(String::new());
        input.city = Some("Toronto".to_string());

        let record = input.shape(None, None);
        assert_eq!(record.get("name"), Some(&json!("Jane Doe")));
        assert_eq!(record.get("phone"), Some(&json!("555-0100")));
        assert_eq!(record.get("city"), Some(&json!("Toronto")));
        assert!(!record.contains_key("street"));
        assert!(!record.contains_key("email"));
        assert!(!record.contains_key("state_id"));
        assert!(!record.contains_key("country_id"));
    }

    #[test]
    fn test_shape_substitutes_resolved_ids() {
        let mut input = customer(None, Some("x@y.com"));
        input.state = Some("Ontario".to_string());
        input.country = Some("Canada".to_string());

        let record = input.shape(Some(5), Some(7));
        assert_eq!(record.get("state_id"), Some(&json!(5)));
        assert_eq!(record.get("country_id"), Some(&json!(7)));
        // Names never reach the backend
        assert!(!record.contains_key("state"));
        assert!(!record.contains_key("country"));
    }

    #[test]
    fn test_shape_emits_only_canonical_keys() {
        let input: NewCustomer = serde_json::from_value(json!({
            "name": "Jane Doe",
            "email": "x@y.com",
            "street2": "Unit 4"
        }))
        .expect("deserializes with unknown keys");

        let record = input.shape(None, None);
        assert!(!record.contains_key("street2"));
    }
}
