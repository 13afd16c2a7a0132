//--------------------------------------------------------------------------------------------------
// ENUMS
//--------------------------------------------------------------------------------------------------
// | Name            | Description                                      | Key Methods         |
// |-----------------|--------------------------------------------------|---------------------|
// | ApiError        | Error types for the API                          | from                |
//--------------------------------------------------------------------------------------------------

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::domain::services::exchange::ExchangeError;

/// Type alias for Result with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// API-specific error types
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The requested resource was not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request was invalid
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requester may not act on this resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The resource is in a state that does not admit the request
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The request is valid but cannot be processed
    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "code": status.as_u16()
            }
        }));

        (status, body).into_response()
    }
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        match &err {
            ExchangeError::AccountNotFound(_) | ExchangeError::OrderNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ExchangeError::InvalidQuantity | ExchangeError::InvalidPrice => {
                Self::BadRequest(err.to_string())
            }
            ExchangeError::NotOwner { .. } => Self::Forbidden(err.to_string()),
            ExchangeError::InvalidState { .. } => Self::Conflict(err.to_string()),
            ExchangeError::InsufficientBalance { .. } | ExchangeError::SelfTradeRejected(_) => {
                Self::Unprocessable(err.to_string())
            }
            ExchangeError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}
