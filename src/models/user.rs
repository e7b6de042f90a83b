//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a user
//! - `CreateUserRequest` / `UpdateUserRequest`: Request bodies
//! - `UserResponse`: Public representation returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user record from the database.
///
/// The password is stored only as an argon2 PHC string in `password_hash`;
/// the plaintext never reaches the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique identifier, generated by the database
    pub id: Uuid,

    /// Display name, at most 255 characters
    pub name: String,

    /// Email address, globally unique
    pub email: String,

    /// Salted argon2 hash of the password
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last profile update
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /users`.
///
/// All fields are optional at the type level so the validation layer can
/// report every missing field instead of failing deserialization.
///
/// ```json
/// {
///   "name": "Harry Oswald",
///   "email": "harryoswald@gmail.com",
///   "password": "password1234"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `PUT /users/{id}`.
///
/// Only name and email can be changed; the password is not updatable
/// through this endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Public representation of a user.
///
/// Excludes `password_hash`.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
