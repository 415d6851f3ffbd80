//! Filter-expression helpers for backend searches.
//!
//! The backend filters records with a list of `(field, operator, value)`
//! triples in prefix notation: a `"|"` token joins the two following
//! conditions with logical OR. With no `"|"` tokens, conditions are
//! implicitly ANDed.

use serde_json::{Value, json};

/// A single `(field, operator, value)` condition.
#[must_use]
pub fn clause(field: &str, operator: &str, value: impl Into<Value>) -> Value {
    json!([field, operator, value.into()])
}

/// Exact-match condition.
#[must_use]
pub fn eq(field: &str, value: impl Into<Value>) -> Value {
    clause(field, "=", value)
}

/// Case-insensitive substring condition.
#[must_use]
pub fn ilike(field: &str, value: impl Into<Value>) -> Value {
    clause(field, "ilike", value)
}

/// Join conditions with logical OR.
///
/// Prefix notation: n conditions need n-1 `"|"` tokens. A single condition
/// is returned as-is.
#[must_use]
pub fn any_of(conditions: Vec<Value>) -> Vec<Value> {
    let mut domain = Vec::with_capacity(conditions.len() * 2);
    for _ in 1..conditions.len() {
        domain.push(Value::String("|".to_string()));
    }
    domain.extend(conditions);
    domain
}
