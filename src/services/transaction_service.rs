//! Transaction service - ownership-scoped CRUD for financial transactions.
//!
//! Every operation takes the caller's user id explicitly and filters by it.
//! An ownership miss and a true miss both surface as
//! [`AppError::TransactionNotFound`], so a transaction id never reveals
//! whether it exists under another user.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{Transaction, TransactionRequest},
    validation::{self, ValidationErrors},
};

/// Allowed transaction statuses. Caller-supplied; no transitions enforced.
pub const STATUSES: [&str; 3] = ["completed", "pending", "failed"];

/// Validated field set for a create or full-replace update.
#[derive(Debug)]
struct TransactionData {
    transaction_type: String,
    amount: Decimal,
    status: String,
    payment_method: String,
    transaction_date: chrono::NaiveDateTime,
    description: Option<String>,
}

fn validate(request: &TransactionRequest) -> Result<TransactionData, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let transaction_type = validation::required_string(
        &mut errors,
        "transaction_type",
        request.transaction_type.as_deref(),
        255,
    );
    let amount = validation::required_decimal(
        &mut errors,
        "amount",
        request.amount,
        Decimal::ZERO,
        Decimal::from(1_000_000_u32),
    );
    let status = validation::one_of(&mut errors, "status", request.status.as_deref(), &STATUSES);
    let payment_method = validation::required_string(
        &mut errors,
        "payment_method",
        request.payment_method.as_deref(),
        255,
    );
    let transaction_date = validation::required_datetime(
        &mut errors,
        "transaction_date",
        request.transaction_date.as_deref(),
    );
    validation::optional_string(
        &mut errors,
        "description",
        request.description.as_deref(),
        1000,
    );

    match (
        transaction_type,
        amount,
        status,
        payment_method,
        transaction_date,
    ) {
        (Some(transaction_type), Some(amount), Some(status), Some(payment_method), Some(date))
            if errors.is_empty() =>
        {
            Ok(TransactionData {
                transaction_type: transaction_type.to_string(),
                amount,
                status: status.to_string(),
                payment_method: payment_method.to_string(),
                transaction_date: date,
                description: request.description.clone(),
            })
        }
        _ => Err(errors),
    }
}

/// List all transactions owned by the caller, newest first.
pub async fn list(pool: &DbPool, caller: Uuid) -> Result<Vec<Transaction>, AppError> {
    let transactions = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT id, user_id, transaction_type, amount, status, payment_method,
               transaction_date, description, created_at, updated_at
        FROM transactions
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(caller)
    .fetch_all(pool)
    .await?;

    Ok(transactions)
}

/// Create a transaction owned by the caller.
///
/// `user_id` is always the authenticated caller, regardless of anything in
/// the request body. Nothing is persisted when validation fails.
pub async fn create(
    pool: &DbPool,
    caller: Uuid,
    request: TransactionRequest,
) -> Result<Transaction, AppError> {
    let data = validate(&request).map_err(AppError::Validation)?;

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions
            (user_id, transaction_type, amount, status, payment_method,
             transaction_date, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, transaction_type, amount, status, payment_method,
                  transaction_date, description, created_at, updated_at
        "#,
    )
    .bind(caller)
    .bind(&data.transaction_type)
    .bind(data.amount)
    .bind(&data.status)
    .bind(&data.payment_method)
    .bind(data.transaction_date)
    .bind(&data.description)
    .fetch_one(pool)
    .await?;

    tracing::info!(transaction_id = %transaction.id, user_id = %caller, "transaction created");

    Ok(transaction)
}

/// Get a transaction by id, scoped to the caller.
pub async fn get_by_id(pool: &DbPool, caller: Uuid, id: Uuid) -> Result<Transaction, AppError> {
    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT id, user_id, transaction_type, amount, status, payment_method,
               transaction_date, description, created_at, updated_at
        FROM transactions
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(caller)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::TransactionNotFound)?;

    Ok(transaction)
}

/// Replace all caller-supplied fields of an owned transaction.
///
/// Full-replace semantics: the complete rule set is re-validated and all six
/// fields are written. The UPDATE itself re-filters by owner, so the
/// existence check cannot be raced into another user's row.
pub async fn update(
    pool: &DbPool,
    caller: Uuid,
    id: Uuid,
    request: TransactionRequest,
) -> Result<Transaction, AppError> {
    // Existence under this owner first: an unknown or foreign id is a 404
    // regardless of the payload.
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM transactions WHERE id = $1 AND user_id = $2)",
    )
    .bind(id)
    .bind(caller)
    .fetch_one(pool)
    .await?;
    if !exists {
        return Err(AppError::TransactionNotFound);
    }

    let data = validate(&request).map_err(AppError::Validation)?;

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET transaction_type = $1, amount = $2, status = $3, payment_method = $4,
            transaction_date = $5, description = $6, updated_at = NOW()
        WHERE id = $7 AND user_id = $8
        RETURNING id, user_id, transaction_type, amount, status, payment_method,
                  transaction_date, description, created_at, updated_at
        "#,
    )
    .bind(&data.transaction_type)
    .bind(data.amount)
    .bind(&data.status)
    .bind(&data.payment_method)
    .bind(data.transaction_date)
    .bind(&data.description)
    .bind(id)
    .bind(caller)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::TransactionNotFound)?;

    Ok(transaction)
}

/// Delete an owned transaction.
pub async fn delete(pool: &DbPool, caller: Uuid, id: Uuid) -> Result<(), AppError> {
    let deleted = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(caller)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(AppError::TransactionNotFound);
    }

    tracing::info!(transaction_id = %id, user_id = %caller, "transaction deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> TransactionRequest {
        TransactionRequest {
            transaction_type: Some("Phone Bill".to_string()),
            amount: Some("40.56".parse().unwrap()),
            status: Some("completed".to_string()),
            payment_method: Some("Bank Transfer".to_string()),
            transaction_date: Some("2024-05-20 05:20:30".to_string()),
            description: Some("Paid phone bill for the month of May".to_string()),
        }
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        let data = validate(&valid_request()).expect("valid input should pass");
        assert_eq!(data.transaction_type, "Phone Bill");
        assert_eq!(data.amount, "40.56".parse::<Decimal>().unwrap());
        assert_eq!(data.status, "completed");
        assert_eq!(
            data.transaction_date
                .format(validation::DATETIME_FORMAT)
                .to_string(),
            "2024-05-20 05:20:30"
        );
    }

    #[test]
    fn validate_accepts_missing_description() {
        let request = TransactionRequest {
            description: None,
            ..valid_request()
        };
        let data = validate(&request).expect("description is optional");
        assert_eq!(data.description, None);
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let errors = validate(&TransactionRequest {
            transaction_type: None,
            amount: None,
            status: None,
            payment_method: None,
            transaction_date: None,
            description: None,
        })
        .unwrap_err();

        for field in [
            "transaction_type",
            "amount",
            "status",
            "payment_method",
            "transaction_date",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("description"));
    }

    #[test]
    fn validate_rejects_amount_outside_range() {
        let request = TransactionRequest {
            amount: Some(Decimal::from(-1)),
            ..valid_request()
        };
        assert!(validate(&request).unwrap_err().contains("amount"));

        let request = TransactionRequest {
            amount: Some("1000000.01".parse().unwrap()),
            ..valid_request()
        };
        assert!(validate(&request).unwrap_err().contains("amount"));
    }

    #[test]
    fn validate_accepts_amount_bounds() {
        let request = TransactionRequest {
            amount: Some(Decimal::ZERO),
            ..valid_request()
        };
        assert!(validate(&request).is_ok());

        let request = TransactionRequest {
            amount: Some(Decimal::from(1_000_000_u32)),
            ..valid_request()
        };
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_status() {
        let request = TransactionRequest {
            status: Some("reversed".to_string()),
            ..valid_request()
        };
        assert!(validate(&request).unwrap_err().contains("status"));
    }

    #[test]
    fn validate_rejects_bad_date_format() {
        let request = TransactionRequest {
            transaction_date: Some("2024-05-20T05:20:30Z".to_string()),
            ..valid_request()
        };
        assert!(validate(&request).unwrap_err().contains("transaction_date"));
    }

    #[test]
    fn validate_rejects_oversized_description() {
        let request = TransactionRequest {
            description: Some("x".repeat(1001)),
            ..valid_request()
        };
        assert!(validate(&request).unwrap_err().contains("description"));
    }
}
