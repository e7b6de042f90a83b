//! Business logic services.
//!
//! Services contain the request-validation-and-persistence flow separated
//! from the HTTP handlers. Every operation takes its dependencies — the
//! pool and, where ownership applies, the caller's user id — explicitly.

pub mod password;
pub mod transaction_service;
pub mod user_service;
