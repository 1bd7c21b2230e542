use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// ApiError
///
/// The full error taxonomy surfaced by the HTTP layer. Every handler returns
/// `Result<_, ApiError>`, and the `IntoResponse` implementation below maps each
/// variant to its status code and a `{"detail": ...}` JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login rejected: the submitted credentials do not match the configured admin identity.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Bearer token missing, malformed, carrying a bad signature, or expired.
    #[error("Could not validate credentials")]
    InvalidToken,

    /// Token was valid but the role claim does not grant access to this endpoint.
    #[error("Admin privileges required")]
    Forbidden,

    /// The addressed record does not exist in its collection.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The underlying document store failed on a write path (reads fall back in-memory).
    #[error("Document store failure: {0}")]
    Store(#[from] StoreError),

    /// A stored document no longer matches its collection schema.
    #[error("Malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Token signing failed. Should not happen with a well-formed secret.
    #[error("Failed to issue access token")]
    TokenCreation,
}

impl ApiError {
    /// The HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Malformed(_) | ApiError::TokenCreation => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures are logged with their cause; the client only
        // ever sees the generic message.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {:?}", self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
