//! User management HTTP handlers.
//!
//! - `POST /users` - Create a user
//! - `GET /users` - List all users
//! - `GET /users/{id}` - Get a user by id
//! - `PUT /users/{id}` - Update name and email
//! - `DELETE /users/{id}` - Delete a user
//!
//! These routes carry no authentication: any caller may list and manage
//! users, while transactions are strictly owner-scoped.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{CreateUserRequest, UpdateUserRequest, UserResponse},
    services::user_service,
};

/// Create a new user.
///
/// # Response
///
/// - **201 Created**: `{ "message": "User created!", "user": { ... } }`
/// - **422**: field → error-list map
pub async fn create_user(
    State(pool): State<DbPool>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = user_service::create(&pool, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created!",
            "user": UserResponse::from(user),
        })),
    ))
}

/// List all users.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "message": "Request successful",
///   "data": [ { "id": "...", "name": "...", "email": "..." } ]
/// }
/// ```
pub async fn list_users(State(pool): State<DbPool>) -> Result<impl IntoResponse, AppError> {
    let users = user_service::list(&pool).await?;
    let data: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "message": "Request successful",
        "data": data,
    })))
}

/// Get a user by id.
///
/// # Response
///
/// - **200 OK**: `{ "user": { ... } }`
/// - **404**: no user with that id
pub async fn get_user(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = user_service::get_by_id(&pool, id).await?;

    Ok(Json(json!({ "user": UserResponse::from(user) })))
}

/// Update a user's name and email.
///
/// Unrelated fields (id, created_at, password) are left untouched.
pub async fn update_user(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = user_service::update(&pool, id, request).await?;

    Ok(Json(json!({
        "message": "User updated",
        "user": UserResponse::from(user),
    })))
}

/// Delete a user.
///
/// # Response
///
/// - **204 No Content**: empty body
/// - **404**: no user with that id
pub async fn delete_user(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    user_service::delete(&pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
