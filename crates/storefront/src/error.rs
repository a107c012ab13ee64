//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures 500-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; responses carry a `{"message": "..."}` JSON
//! body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::cart::CartError;
use crate::store::StoreError;

/// Application-level error type for the storefront API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input, rejected before touching the
    /// store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No user identity could be resolved for a cart operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying persistence failure.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        // Constraint violations are the caller's fault, not the store's.
        match error {
            StoreError::DuplicateSlug(slug) => {
                Self::Validation(format!("Slug already in use: {slug}"))
            }
            StoreError::DuplicateUser(who) => {
                Self::Validation(format!("User already exists: {who}"))
            }
            StoreError::MissingParent(id) => {
                Self::Validation(format!("Parent category {id} does not exist"))
            }
            other => Self::Store(other),
        }
    }
}

impl From<CartError> for AppError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::InvalidQuantity => Self::Validation("Invalid quantity value".to_owned()),
            CartError::ItemNotFound(_) => Self::NotFound("Cart item not found".to_owned()),
            CartError::ProductNotFound(id) => {
                Self::Validation(format!("Product {id} does not exist"))
            }
            CartError::Store(store_error) => Self::from(store_error),
        }
    }
}

/// JSON error body, mirroring the success `message` envelope.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose persistence details to clients
        let message = match self {
            Self::Store(_) => "Internal server error".to_owned(),
            Self::Validation(message) | Self::NotFound(message) | Self::Unauthorized(message) => {
                message
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
