//! Token issuance endpoint.
//!
//! `POST /authenticate` exchanges an email/password pair for a bearer token
//! accepted by the transaction routes.

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    db::DbPool, error::AppError, models::auth_token::AuthenticateRequest,
    models::user::UserResponse, services::user_service,
};

/// Authenticate a user and mint a bearer token.
///
/// # Response
///
/// - **200 OK**: `{ "message": "...", "token": "<plaintext>", "user": { ... } }`
/// - **401**: unknown email or wrong password (indistinguishable)
/// - **422**: missing fields
///
/// The token appears in this response only; the server keeps just its
/// SHA-256 digest.
pub async fn authenticate(
    State(pool): State<DbPool>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, token) = user_service::authenticate(&pool, request).await?;

    Ok(Json(json!({
        "message": "Authentication successful",
        "token": token,
        "user": UserResponse::from(user),
    })))
}
