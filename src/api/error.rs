use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::responses::StatusMessage;
use crate::database::connection::DatabaseError;
use crate::provider::ProviderError;

/// API error taxonomy
///
/// Every variant is reported synchronously to the caller as a short
/// status string; nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Symbol (or id) absent from the store
    #[error("company not found")]
    NotFound,

    /// Required body field absent
    #[error("symbol not provided")]
    MissingField,

    /// Provider returned no usable display name
    #[error("company name not found in Yahoo Finance data")]
    ProviderLookupFailed,

    /// Symbol already exists on create (create is not idempotent)
    #[error("company already exists")]
    Conflict,

    #[error("database error: {0}")]
    Database(DatabaseError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        match e {
            // Unique violations surface as the domain conflict, not a 500
            DatabaseError::DuplicateSymbol(_) => ApiError::Conflict,
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::MissingField => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::ProviderLookupFailed => (StatusCode::BAD_REQUEST, self.to_string()),
            // The original API reports already-exists as 400, not 409
            ApiError::Conflict => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::Provider(e) => {
                tracing::error!("Provider error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(StatusMessage { status: message });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(ApiError::NotFound.to_string(), "company not found");
        assert_eq!(ApiError::MissingField.to_string(), "symbol not provided");
        assert_eq!(
            ApiError::ProviderLookupFailed.to_string(),
            "company name not found in Yahoo Finance data"
        );
        assert_eq!(ApiError::Conflict.to_string(), "company already exists");
    }

    #[test]
    fn test_duplicate_symbol_maps_to_conflict() {
        let e: ApiError = DatabaseError::DuplicateSymbol("AAPL".to_string()).into();
        assert!(matches!(e, ApiError::Conflict));
    }
}
