//! Bearer token model backing the authentication middleware.
//!
//! Tokens are minted by `POST /authenticate` and stored as SHA-256 hex
//! digests. The middleware resolves an incoming bearer token to the owning
//! user by hashing it and looking the digest up here.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Represents an auth token record from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    /// Unique identifier for this token
    pub id: Uuid,

    /// User this token authenticates as
    pub user_id: Uuid,

    /// SHA-256 hex digest of the token (64 characters)
    ///
    /// The plaintext token is returned to the caller once and never stored.
    pub token_hash: String,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /authenticate`.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
