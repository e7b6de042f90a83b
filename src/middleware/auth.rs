//! Bearer token authentication middleware.
//!
//! Every request to a protected route passes through here:
//! 1. Extract the token from the `Authorization: Bearer <token>` header
//! 2. Hash it with SHA-256 and look the digest up in `auth_tokens`
//! 3. Inject an [`AuthContext`] with the owning user's id into the request
//! 4. Reject unknown or missing tokens with HTTP 401
//!
//! Token issuance lives in the user service; this middleware only consumes
//! the resulting identity.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{db::DbPool, error::AppError, models::auth_token::AuthToken};

/// Identity of the authenticated caller, attached to the request extensions.
///
/// Handlers extract this with `Extension<AuthContext>` and pass the user id
/// explicitly into every service call.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Id of the user the presented token belongs to
    pub user_id: Uuid,
}

/// SHA-256 hex digest of a bearer token.
///
/// Both this middleware and the token-issuing service must produce the same
/// digest for the same token.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Authentication middleware for the `/transactions` routes.
pub async fn auth_middleware(
    State(pool): State<DbPool>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthenticated)?;

    // Expected format: "Bearer <token>"
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthenticated)?;

    let token_hash = hash_token(token);

    let token_record = sqlx::query_as::<_, AuthToken>(
        "SELECT id, user_id, token_hash, created_at
         FROM auth_tokens
         WHERE token_hash = $1",
    )
    .bind(&token_hash)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::Unauthenticated)?;

    request.extensions_mut().insert(AuthContext {
        user_id: token_record.user_id,
    });

    Ok(next.run(request).await)
}
