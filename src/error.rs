//! Error types and HTTP error response handling.
//!
//! Every service operation converts its failures into an [`AppError`] at the
//! boundary; the [`IntoResponse`] impl turns each variant into the matching
//! status code and JSON body. There are no partial failures — each operation
//! is all-or-nothing.
//!
//! # Status Code Mapping
//!
//! - `Validation` → 422 Unprocessable Entity (body is the raw field map)
//! - `Unauthenticated` / `InvalidCredentials` → 401 Unauthorized
//! - `UserNotFound` / `TransactionNotFound` → 404 Not Found
//! - `Database` / `Hashing` → 500 Internal Server Error
//!
//! A not-found response is identical whether the record does not exist or
//! belongs to another user, so transaction ids never leak across owners.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::validation::ValidationErrors;

/// Application-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bearer token is missing, malformed, or unknown.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Email/password pair did not match a user.
    ///
    /// Does not say which of the two was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No user with the requested id.
    #[error("User not found")]
    UserNotFound,

    /// No transaction with the requested id owned by the caller.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// Request input violated one or more field constraints.
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Password hashing or hash parsing failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // The 422 body is the bare field → messages map, no envelope.
            AppError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthenticated." })),
            )
                .into_response(),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid email or password." })),
            )
                .into_response(),
            AppError::UserNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "User not found." })),
            )
                .into_response(),
            AppError::TransactionNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Transaction not found." })),
            )
                .into_response(),
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": "An unexpected error occurred.",
                        "error": err.to_string(),
                    })),
                )
                    .into_response()
            }
            AppError::Hashing(detail) => {
                tracing::error!(error = %detail, "password hashing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": "An unexpected error occurred.",
                        "error": detail,
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_422_with_bare_field_map() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "email must be a valid email address");
        errors.add("password", "password must be at least 8 characters");

        let response = AppError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(
            body["email"][0].as_str().unwrap(),
            "email must be a valid email address"
        );
        assert_eq!(
            body["password"][0].as_str().unwrap(),
            "password must be at least 8 characters"
        );
        // No envelope around the field map.
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = AppError::UserNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::TransactionNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"].as_str().unwrap(), "Transaction not found.");
    }

    #[tokio::test]
    async fn auth_failures_map_to_401() {
        assert_eq!(
            AppError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn database_errors_map_to_500_with_detail() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(
            body["message"].as_str().unwrap(),
            "An unexpected error occurred."
        );
        assert!(body["error"].as_str().is_some());
    }
}
