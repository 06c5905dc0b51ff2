//! Corner Shop Storefront library.
//!
//! This crate provides the account service as a library, allowing the router
//! to be tested and reused. [`app`] assembles the full HTTP stack.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, http::HeaderName};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Unknown paths are served from the configured static directory.
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let cors = middleware::cors_layer(&config.allowed_origin)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);
    let static_files = ServeDir::new(&config.static_dir);

    routes::routes()
        .fallback_service(static_files)
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
