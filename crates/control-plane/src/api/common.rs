// Common DTOs and error mapping for the public API
//
// These types are shared across endpoints. Every error body has the shape
// {"message": ...}: a string for lookups, a field map for validation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

use super::validation::ValidationError;

/// Returned when an event id does not resolve to a stored event.
pub const EVENT_NOT_FOUND_MESSAGE: &str = "The event doesn't exist!";

/// Body of a 500 response. Store details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error message: a plain sentence, or one sentence per failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    Fields(BTreeMap<String, String>),
}

/// Standard error response for API endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// What went wrong.
    pub message: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: ErrorMessage::Text(message.into()),
        }
    }

    pub fn fields(fields: BTreeMap<String, String>) -> Self {
        Self {
            message: ErrorMessage::Fields(fields),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Confirmation body for operations that return no entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "The event has been deleted!")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request fields (400)
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced event does not exist (404)
    #[error("event not found")]
    NotFound,

    /// Store failure (500); already logged where it happened
    #[error("internal error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::fields(err.into_fields()),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(EVENT_NOT_FOUND_MESSAGE),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE),
            ),
        };
        body.into_response(status).into_response()
    }
}
