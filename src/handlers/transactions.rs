//! Transaction HTTP handlers.
//!
//! - `POST /transactions` - Create a transaction
//! - `GET /transactions` - List the caller's transactions
//! - `GET /transactions/{id}` - Get one of the caller's transactions
//! - `PUT /transactions/{id}` - Full-replace update
//! - `DELETE /transactions/{id}` - Delete
//!
//! All routes sit behind the bearer token middleware; the caller's identity
//! arrives as an [`AuthContext`] extension and is passed explicitly into
//! every service call.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::transaction::{TransactionRequest, TransactionResponse},
    services::transaction_service,
};

/// Create a transaction owned by the authenticated caller.
///
/// # Request Body
///
/// ```json
/// {
///   "transaction_type": "Phone Bill",
///   "amount": 40.56,
///   "status": "completed",
///   "payment_method": "Bank Transfer",
///   "transaction_date": "2024-05-20 05:20:30",
///   "description": "Paid phone bill for the month of May"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: `{ "message": "Transaction created!", "transaction": { ... } }`
/// - **422**: field → error-list map, every violated field listed
pub async fn create_transaction(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<TransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let transaction = transaction_service::create(&pool, auth.user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Transaction created!",
            "transaction": TransactionResponse::from(transaction),
        })),
    ))
}

/// List all transactions owned by the authenticated caller.
pub async fn list_transactions(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = transaction_service::list(&pool, auth.user_id).await?;
    let transactions: Vec<TransactionResponse> = transactions.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "message": "Request successful",
        "transactions": transactions,
    })))
}

/// Get one of the caller's transactions by id.
///
/// Returns 404 whether the id is unknown or owned by someone else.
pub async fn get_transaction(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let transaction = transaction_service::get_by_id(&pool, auth.user_id, id).await?;

    Ok(Json(json!({
        "message": "Request successful",
        "transaction": TransactionResponse::from(transaction),
    })))
}

/// Replace all fields of one of the caller's transactions.
pub async fn update_transaction(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let transaction = transaction_service::update(&pool, auth.user_id, id, request).await?;

    Ok(Json(json!({
        "message": "Transaction updated",
        "transaction": TransactionResponse::from(transaction),
    })))
}

/// Delete one of the caller's transactions.
pub async fn delete_transaction(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    transaction_service::delete(&pool, auth.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
