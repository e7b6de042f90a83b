//! Personal finance tracker REST API.
//!
//! CRUD for two resources backed by PostgreSQL: **users** and the financial
//! **transactions** they own. User routes are public; transaction routes
//! require a bearer token issued by `POST /authenticate` and only ever
//! operate on the caller's own rows.
//!
//! # Architecture
//!
//! - **Web framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: bearer tokens with SHA-256 digests at rest
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::DbPool;

/// Build the application router.
///
/// Transaction routes are wrapped in the auth middleware; user routes, the
/// authenticate endpoint, and the health check are public.
pub fn app(pool: DbPool) -> Router {
    let protected_routes = Router::new()
        .route("/transactions", post(handlers::transactions::create_transaction))
        .route("/transactions", get(handlers::transactions::list_transactions))
        .route("/transactions/{id}", get(handlers::transactions::get_transaction))
        .route("/transactions/{id}", put(handlers::transactions::update_transaction))
        .route("/transactions/{id}", delete(handlers::transactions::delete_transaction))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            pool.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/users", post(handlers::users::create_user))
        .route("/users", get(handlers::users::list_users))
        .route("/users/{id}", get(handlers::users::get_user))
        .route("/users/{id}", put(handlers::users::update_user))
        .route("/users/{id}", delete(handlers::users::delete_user))
        .route("/authenticate", post(handlers::auth::authenticate))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Share the database pool with all handlers via State extraction
        .with_state(pool)
}
