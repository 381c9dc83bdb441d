use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::database::QueryError;

/// API error types that can be returned from handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input and empty results both land here, with the message as the body.
    #[error("{0}")]
    NotFound(String),

    /// Store failures; the detail is logged, never returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response that gets serialized to JSON
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// Map a query failure, turning "no rows" into a 404 carrying `message`.
    pub fn from_query(error: QueryError, message: impl FnOnce() -> String) -> Self {
        match error {
            QueryError::NoData => ApiError::NotFound(message()),
            other => other.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            ApiError::Internal(_) => {
                tracing::error!(error = %self, "API error occurred");
                "An internal error occurred".to_string()
            }
            ApiError::NotFound(message) => {
                tracing::debug!(error = %self, "Client error");
                message.clone()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::NoData => ApiError::NotFound("No matching data found.".to_string()),
            QueryError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}
