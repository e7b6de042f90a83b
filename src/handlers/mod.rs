//! HTTP request handlers (route handlers).
//!
//! Handlers stay thin: they extract request data, call a service, and wrap
//! the result in the response envelope. All business rules live in
//! `crate::services`.

/// Token issuance endpoint
pub mod auth;
/// Health check endpoint
pub mod health;
/// Transaction CRUD endpoints
pub mod transactions;
/// User CRUD endpoints
pub mod users;
