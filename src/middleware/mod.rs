//! HTTP middleware components.
//!
//! Middleware run before route handlers and can short-circuit a request,
//! e.g. rejecting an unauthenticated call before it reaches a handler.

/// Bearer token authentication middleware
pub mod auth;
