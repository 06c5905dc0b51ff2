//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database reachable)
//!
//! # Auth
//! POST /register               - Create an account, redirect to login page
//! POST /login                  - Check credentials, redirect to home page
//! ```
//!
//! Anything else falls through to the static asset directory.

pub mod auth;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}
