//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. CORS (single allowed origin)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)
//!
//! [`JsonOrForm`] is an extractor rather than a layer; handlers opt in per route.

pub mod body;
pub mod cors;
pub mod request_id;

pub use body::JsonOrForm;
pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
