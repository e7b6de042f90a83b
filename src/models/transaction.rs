//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a financial transaction
//! - `TransactionRequest`: Request body for create and update (full replace)
//! - `TransactionResponse`: Response body returned to clients

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a transaction record from the database.
///
/// Each transaction belongs to exactly one user via `user_id`, which is set
/// from the authenticated caller at creation and never reassigned. Amounts
/// are stored as `NUMERIC(12, 2)` and mapped to [`Decimal`] so fractional
/// values round-trip exactly.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Transaction {
    /// Unique identifier for this transaction
    pub id: Uuid,

    /// Foreign key to the owning user
    ///
    /// Every query against this table filters by `user_id` as well as `id`.
    pub user_id: Uuid,

    /// Free-form category, e.g. "Phone Bill", at most 255 characters
    pub transaction_type: String,

    /// Amount, between 0 and 1,000,000 inclusive
    pub amount: Decimal,

    /// One of "completed", "pending", "failed"
    ///
    /// Caller-supplied; the service enforces membership but no transitions.
    pub status: String,

    /// How the transaction was paid, e.g. "Bank Transfer"
    pub payment_method: String,

    /// When the transaction took place, wire format `YYYY-MM-DD HH:MM:SS`
    pub transaction_date: NaiveDateTime,

    /// Optional free text, at most 1000 characters
    pub description: Option<String>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /transactions` and `PUT /transactions/{id}`.
///
/// Updates use full-replace semantics, so the same field set and rules apply
/// to both operations. Any `user_id` present in the body is ignored — the
/// owner always comes from the authenticated caller.
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
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub transaction_type: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_date: Option<String>,
    pub description: Option<String>,
}

/// Response body for transaction endpoints.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub transaction_type: String,
    pub amount: Decimal,
    pub status: String,
    pub payment_method: String,
    #[serde(with = "datetime_format")]
    pub transaction_date: NaiveDateTime,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            status: transaction.status,
            payment_method: transaction.payment_method,
            transaction_date: transaction.transaction_date,
            description: transaction.description,
            user_id: transaction.user_id,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

/// Serde adapter keeping `transaction_date` in the fixed wire format.
pub mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::validation::DATETIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            transaction_type: "Phone Bill".to_string(),
            amount: "40.56".parse().unwrap(),
            status: "completed".to_string(),
            payment_method: "Bank Transfer".to_string(),
            transaction_date: NaiveDateTime::parse_from_str(
                "2024-05-20 05:20:30",
                crate::validation::DATETIME_FORMAT,
            )
            .unwrap(),
            description: Some("Paid phone bill for the month of May".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn transaction_date_serializes_in_wire_format() {
        let json = serde_json::to_value(TransactionResponse::from(sample())).unwrap();
        assert_eq!(
            json["transaction_date"].as_str().unwrap(),
            "2024-05-20 05:20:30"
        );
    }

    #[test]
    fn amount_round_trips_exactly() {
        let json = serde_json::to_value(TransactionResponse::from(sample())).unwrap();
        let amount: Decimal = json["amount"].as_str().unwrap().parse().unwrap();
        assert_eq!(amount, "40.56".parse::<Decimal>().unwrap());
    }

    #[test]
    fn request_accepts_numeric_amounts() {
        let request: TransactionRequest = serde_json::from_value(serde_json::json!({
            "transaction_type": "Phone Bill",
            "amount": 40.56,
            "status": "completed",
            "payment_method": "Bank Transfer",
            "transaction_date": "2024-05-20 05:20:30"
        }))
        .unwrap();

        assert_eq!(request.amount, Some("40.56".parse().unwrap()));
        assert_eq!(request.description, None);
    }
}
