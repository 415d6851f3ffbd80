//! Unified error handling for the gateway.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;

/// Application-level error type for route handlers and services.
///
/// Services return a kind; the HTTP status is decided here, never inside
/// the services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller-supplied input is missing, malformed, or names an entity
    /// that does not resolve.
    #[error("{0}")]
    InvalidInput(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A duplicate record blocks the operation.
    #[error("{0}")]
    Conflict(String),

    /// Backend RPC or transport failure.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// JSON error envelope returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server faults with Sentry; client faults are the caller's problem
        if matches!(self, Self::Backend(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Gateway request error"
            );
        }

        let status = match &self {
            // Conflict maps to 400 (not 409) by this API's convention
            Self::InvalidInput(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose backend fault details to clients
        let message = match &self {
            Self::Backend(_) => "Backend request failed".to_string(),
            _ => self.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("Customer not found.".to_string());
        assert_eq!(err.to_string(), "Customer not found.");

        let err = ApiError::InvalidInput("Either phone or email must be provided.".to_string());
        assert_eq!(err.to_string(), "Either phone or email must be provided.");
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            get_status(ApiError::InvalidInput("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ApiError::Backend(BackendError::Protocol(
                "test".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_maps_to_bad_request() {
        // Deliberate convention: duplicate customers answer 400, not 409
        assert_eq!(
            get_status(ApiError::Conflict("duplicate".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
