//! User service - CRUD and authentication for user accounts.
//!
//! Responsibilities:
//! - Field validation for create and update
//! - Email uniqueness (pre-check, with the database unique index as the
//!   fallback when a concurrent insert wins the race)
//! - Password hashing on create
//! - Token issuance for `POST /authenticate`

use rand::RngCore;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::hash_token,
    models::{
        auth_token::AuthenticateRequest,
        user::{CreateUserRequest, UpdateUserRequest, User},
    },
    services::password,
    validation::{self, ValidationErrors},
};

/// Validated input for creating a user.
#[derive(Debug)]
struct NewUser {
    name: String,
    email: String,
    password: String,
}

/// Validated input for updating a user's profile.
#[derive(Debug)]
struct UserUpdate {
    name: String,
    email: String,
}

/// Validated credentials for authentication.
#[derive(Debug)]
struct Credentials {
    email: String,
    password: String,
}

fn validate_new(request: &CreateUserRequest) -> Result<NewUser, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = validation::required_string(&mut errors, "name", request.name.as_deref(), 255);
    let email = validation::required_string(&mut errors, "email", request.email.as_deref(), 255);
    if let Some(email) = email {
        validation::email_syntax(&mut errors, "email", email);
    }
    let password = validation::required(&mut errors, "password", request.password.as_deref());
    if let Some(password) = password {
        validation::min_length(&mut errors, "password", password, 8);
    }

    match (name, email, password) {
        (Some(name), Some(email), Some(password)) if errors.is_empty() => Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }),
        _ => Err(errors),
    }
}

fn validate_update(request: &UpdateUserRequest) -> Result<UserUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = validation::required_string(&mut errors, "name", request.name.as_deref(), 255);
    let email = validation::required_string(&mut errors, "email", request.email.as_deref(), 255);
    if let Some(email) = email {
        validation::email_syntax(&mut errors, "email", email);
    }

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(UserUpdate {
            name: name.to_string(),
            email: email.to_string(),
        }),
        _ => Err(errors),
    }
}

fn validate_credentials(request: &AuthenticateRequest) -> Result<Credentials, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = validation::required(&mut errors, "email", request.email.as_deref());
    let password = validation::required(&mut errors, "password", request.password.as_deref());

    match (email, password) {
        (Some(email), Some(password)) if errors.is_empty() => Ok(Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }),
        _ => Err(errors),
    }
}

/// Turn a storage-level unique violation on the email index into the same
/// validation error the pre-check produces. Covers the check-then-insert race.
fn map_unique_violation(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            let mut errors = ValidationErrors::new();
            errors.add("email", "email has already been taken");
            AppError::Validation(errors)
        }
        other => AppError::Database(other),
    }
}

/// List all users, newest first.
///
/// No ownership scoping: any caller may list all users.
pub async fn list(pool: &DbPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at, updated_at
        FROM users
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Create a user from validated input.
///
/// The password is hashed before the insert; nothing is persisted when any
/// constraint fails.
pub async fn create(pool: &DbPool, request: CreateUserRequest) -> Result<User, AppError> {
    let input = validate_new(&request).map_err(AppError::Validation)?;

    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(&input.email)
        .fetch_one(pool)
        .await?;
    if taken {
        let mut errors = ValidationErrors::new();
        errors.add("email", "email has already been taken");
        return Err(AppError::Validation(errors));
    }

    let password_hash = password::hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)?;

    tracing::info!(user_id = %user.id, "user created");

    Ok(user)
}

/// Get a user by id.
pub async fn get_by_id(pool: &DbPool, id: Uuid) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::UserNotFound)?;

    Ok(user)
}

/// Update a user's name and email.
///
/// Only the two profile fields and `updated_at` change; the email uniqueness
/// check excludes the record itself.
pub async fn update(pool: &DbPool, id: Uuid, request: UpdateUserRequest) -> Result<User, AppError> {
    // Existence first: an unknown id is a 404 regardless of the payload.
    let current = get_by_id(pool, id).await?;

    let input = validate_update(&request).map_err(AppError::Validation)?;

    let taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)")
            .bind(&input.email)
            .bind(current.id)
            .fetch_one(pool)
            .await?;
    if taken {
        let mut errors = ValidationErrors::new();
        errors.add("email", "email has already been taken");
        return Err(AppError::Validation(errors));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = $1, email = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING id, name, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(current.id)
    .fetch_optional(pool)
    .await
    .map_err(map_unique_violation)?
    .ok_or(AppError::UserNotFound)?;

    Ok(user)
}

/// Delete a user by id.
pub async fn delete(pool: &DbPool, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::UserNotFound);
    }

    tracing::info!(user_id = %id, "user deleted");

    Ok(())
}

/// Verify credentials and mint a bearer token.
///
/// The plaintext token is returned exactly once; only its SHA-256 digest is
/// stored. Unknown email and wrong password produce the same error.
pub async fn authenticate(
    pool: &DbPool,
    request: AuthenticateRequest,
) -> Result<(User, String), AppError> {
    let credentials = validate_credentials(&request).map_err(AppError::Validation)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(&credentials.email)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&credentials.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let mut token_bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut token_bytes);
    let token = hex::encode(token_bytes);

    sqlx::query("INSERT INTO auth_tokens (user_id, token_hash) VALUES ($1, $2)")
        .bind(user.id)
        .bind(hash_token(&token))
        .execute(pool)
        .await?;

    tracing::info!(user_id = %user.id, "auth token issued");

    Ok((user, token))
}
