//! Shared field-constraint checking used by both services.
//!
//! Every mutation validates its input before touching the database. All
//! violations for a request are collected into a single [`ValidationErrors`]
//! map so the client sees every failing field at once, not just the first.
//!
//! # Response Format
//!
//! A failed validation serializes as the raw field map returned with
//! HTTP 422:
//!
//! ```json
//! {
//!   "amount": ["amount must be between 0 and 1000000"],
//!   "status": ["status must be one of completed, pending, failed"]
//! }
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

/// Wire format for `transaction_date` fields: `YYYY-MM-DD HH:MM:SS`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Ordered map of field name to the list of messages for that field.
///
/// Fields are kept sorted so responses are stable across runs.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// Check that a field is present and non-blank.
///
/// Returns the value when present so callers can chain further checks.
pub fn required<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.add(field, format!("{field} is required"));
            None
        }
    }
}

/// Check a required string field: present, non-empty, at most `max` characters.
///
/// Returns the value when present so callers can chain further checks.
pub fn required_string<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a str>,
    max: usize,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            if v.chars().count() > max {
                errors.add(
                    field,
                    format!("{field} must not be longer than {max} characters"),
                );
            }
            Some(v)
        }
        _ => {
            errors.add(field, format!("{field} is required"));
            None
        }
    }
}

/// Check an optional string field against a maximum length. Absent is fine.
pub fn optional_string(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.add(
                field,
                format!("{field} must not be longer than {max} characters"),
            );
        }
    }
}

/// Check email syntax. Returns whether the value looked like an address.
pub fn email_syntax(errors: &mut ValidationErrors, field: &str, value: &str) -> bool {
    if EMAIL_RE.is_match(value) {
        true
    } else {
        errors.add(field, format!("{field} must be a valid email address"));
        false
    }
}

/// Check a minimum character count.
pub fn min_length(errors: &mut ValidationErrors, field: &str, value: &str, min: usize) {
    if value.chars().count() < min {
        errors.add(field, format!("{field} must be at least {min} characters"));
    }
}

/// Check a required numeric field against an inclusive range.
///
/// Returns the value when present, even if out of range, so the caller can
/// rely on `errors` alone for the pass/fail decision.
pub fn required_decimal(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Decimal>,
    min: Decimal,
    max: Decimal,
) -> Option<Decimal> {
    match value {
        Some(v) => {
            if v < min || v > max {
                errors.add(field, format!("{field} must be between {min} and {max}"));
            }
            Some(v)
        }
        None => {
            errors.add(field, format!("{field} is required"));
            None
        }
    }
}

/// Check a required enum-membership field.
pub fn one_of<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a str>,
    allowed: &[&str],
) -> Option<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            if !allowed.contains(&v) {
                errors.add(
                    field,
                    format!("{field} must be one of {}", allowed.join(", ")),
                );
            }
            Some(v)
        }
        _ => {
            errors.add(field, format!("{field} is required"));
            None
        }
    }
}

/// Check a required datetime field against [`DATETIME_FORMAT`].
///
/// Returns the parsed value so the caller persists exactly what was checked.
pub fn required_datetime(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<NaiveDateTime> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            match NaiveDateTime::parse_from_str(v, DATETIME_FORMAT) {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    errors.add(
                        field,
                        format!("{field} must match the format YYYY-MM-DD HH:MM:SS"),
                    );
                    None
                }
            }
        }
        _ => {
            errors.add(field, format!("{field} is required"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank_without_a_length_cap() {
        let mut errors = ValidationErrors::new();
        assert!(required(&mut errors, "password", None).is_none());
        assert!(required(&mut errors, "password", Some(" ")).is_none());
        assert!(errors.contains("password"));

        let mut errors = ValidationErrors::new();
        let long = "x".repeat(512);
        assert!(required(&mut errors, "password", Some(&long)).is_some());
        assert!(errors.is_empty());
    }

    #[test]
    fn required_string_rejects_missing_and_blank() {
        let mut errors = ValidationErrors::new();
        assert!(required_string(&mut errors, "name", None, 255).is_none());
        assert!(required_string(&mut errors, "name", Some("   "), 255).is_none());
        assert!(errors.contains("name"));
    }

    #[test]
    fn required_string_rejects_over_max_length() {
        let mut errors = ValidationErrors::new();
        let long = "x".repeat(256);
        assert!(required_string(&mut errors, "name", Some(&long), 255).is_some());
        assert!(errors.contains("name"));
    }

    #[test]
    fn required_string_accepts_exact_max_length() {
        let mut errors = ValidationErrors::new();
        let at_limit = "x".repeat(255);
        required_string(&mut errors, "name", Some(&at_limit), 255);
        assert!(errors.is_empty());
    }

    #[test]
    fn optional_string_allows_absent_values() {
        let mut errors = ValidationErrors::new();
        optional_string(&mut errors, "description", None, 1000);
        assert!(errors.is_empty());

        let long = "x".repeat(1001);
        optional_string(&mut errors, "description", Some(&long), 1000);
        assert!(errors.contains("description"));
    }

    #[test]
    fn email_syntax_accepts_plausible_addresses() {
        let mut errors = ValidationErrors::new();
        assert!(email_syntax(&mut errors, "email", "harryoswald@gmail.com"));
        assert!(errors.is_empty());
    }

    #[test]
    fn email_syntax_rejects_garbage() {
        for bad in ["not-an-email", "a@b", "two@@signs.com", "spaces in@mail.com"] {
            let mut errors = ValidationErrors::new();
            assert!(!email_syntax(&mut errors, "email", bad), "accepted {bad:?}");
            assert!(errors.contains("email"));
        }
    }

    #[test]
    fn min_length_counts_characters() {
        let mut errors = ValidationErrors::new();
        min_length(&mut errors, "password", "short", 8);
        assert!(errors.contains("password"));

        let mut errors = ValidationErrors::new();
        min_length(&mut errors, "password", "longenough", 8);
        assert!(errors.is_empty());
    }

    #[test]
    fn required_decimal_enforces_inclusive_range() {
        let min = Decimal::ZERO;
        let max = Decimal::from(1_000_000_u32);

        let mut errors = ValidationErrors::new();
        required_decimal(&mut errors, "amount", Some(Decimal::ZERO), min, max);
        required_decimal(&mut errors, "amount", Some(max), min, max);
        assert!(errors.is_empty());

        let mut errors = ValidationErrors::new();
        required_decimal(&mut errors, "amount", Some(Decimal::from(-1)), min, max);
        assert!(errors.contains("amount"));

        let mut errors = ValidationErrors::new();
        let over: Decimal = "1000000.01".parse().unwrap();
        required_decimal(&mut errors, "amount", Some(over), min, max);
        assert!(errors.contains("amount"));
    }

    #[test]
    fn required_decimal_reports_missing_value() {
        let mut errors = ValidationErrors::new();
        let value = required_decimal(
            &mut errors,
            "amount",
            None,
            Decimal::ZERO,
            Decimal::from(1_000_000_u32),
        );
        assert!(value.is_none());
        assert!(errors.contains("amount"));
    }

    #[test]
    fn one_of_enforces_membership() {
        let allowed = ["completed", "pending", "failed"];

        let mut errors = ValidationErrors::new();
        one_of(&mut errors, "status", Some("pending"), &allowed);
        assert!(errors.is_empty());

        let mut errors = ValidationErrors::new();
        one_of(&mut errors, "status", Some("reversed"), &allowed);
        assert!(errors.contains("status"));

        let mut errors = ValidationErrors::new();
        one_of(&mut errors, "status", None, &allowed);
        assert!(errors.contains("status"));
    }

    #[test]
    fn required_datetime_parses_the_fixed_format() {
        let mut errors = ValidationErrors::new();
        let parsed = required_datetime(&mut errors, "transaction_date", Some("2024-05-20 05:20:30"));
        assert!(errors.is_empty());
        let parsed = parsed.unwrap();
        assert_eq!(
            parsed.format(DATETIME_FORMAT).to_string(),
            "2024-05-20 05:20:30"
        );
    }

    #[test]
    fn required_datetime_rejects_other_formats() {
        for bad in ["2024-05-20", "20/05/2024 05:20:30", "2024-05-20T05:20:30Z", "yesterday"] {
            let mut errors = ValidationErrors::new();
            assert!(
                required_datetime(&mut errors, "transaction_date", Some(bad)).is_none(),
                "accepted {bad:?}"
            );
            assert!(errors.contains("transaction_date"));
        }
    }

    #[test]
    fn violations_accumulate_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "email is required");
        errors.add("email", "email must be a valid email address");
        errors.add("name", "name is required");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"].as_array().unwrap().len(), 2);
        assert_eq!(json["name"].as_array().unwrap().len(), 1);
    }
}
