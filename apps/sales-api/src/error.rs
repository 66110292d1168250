//! API error types with HTTP response mapping.
//!
//! ```text
//! SaleError::NotFound / ItemNotFound   → 404 NOT_FOUND
//! SaleError::AlreadyCancelled          → 400 ALREADY_CANCELLED
//! CoreError::Validation                → 400 VALIDATION_FAILED
//! CoreError::InvalidQuantity           → 422 INVALID_QUANTITY
//! CoreError::AmountOverflow            → 422 AMOUNT_OVERFLOW
//! unreadable JSON body                 → 400 VALIDATION_FAILED
//! SaleError::Conflict                  → 409 CONFLICT
//! SaleError::Store                     → 500 INTERNAL (logged)
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sales_core::{CoreError, SaleError};
use serde::Serialize;

/// Machine-readable error code in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    AlreadyCancelled,
    ValidationFailed,
    InvalidQuantity,
    AmountOverflow,
    Conflict,
    Internal,
}

/// JSON error body: `{"code": "...", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// A sale use-case failed.
    Sale(SaleError),
    /// The request body was not a well-formed sale draft.
    InvalidBody(JsonRejection),
}

/// `Json` extractor whose rejections use the `{code, message}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl ApiError {
    /// Status and code for this error.
    pub fn classify(&self) -> (StatusCode, ErrorCode) {
        match self {
            ApiError::Sale(err) => match err {
                SaleError::NotFound { .. } | SaleError::ItemNotFound { .. } => {
                    (StatusCode::NOT_FOUND, ErrorCode::NotFound)
                }
                SaleError::AlreadyCancelled { .. } => {
                    (StatusCode::BAD_REQUEST, ErrorCode::AlreadyCancelled)
                }
                SaleError::Core(CoreError::Validation(_)) => {
                    (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed)
                }
                SaleError::Core(CoreError::InvalidQuantity { .. }) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::InvalidQuantity)
                }
                SaleError::Core(CoreError::AmountOverflow { .. }) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::AmountOverflow)
                }
                SaleError::Conflict { .. } => (StatusCode::CONFLICT, ErrorCode::Conflict),
                SaleError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal),
            },
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        let message = match self {
            ApiError::Sale(err) => err.to_string(),
            ApiError::InvalidBody(rejection) => rejection.body_text(),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "internal server error");
        } else {
            tracing::debug!(error = %message, status = status.as_u16(), "request rejected");
        }

        let body = ErrorBody { code, message };
        (status, Json(body)).into_response()
    }
}

impl From<SaleError> for ApiError {
    fn from(err: SaleError) -> Self {
        ApiError::Sale(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}
