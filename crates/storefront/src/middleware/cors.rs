//! Cross-origin access for the storefront's own front end.

use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer admitting exactly one origin.
///
/// `allowed_origin` is compared byte for byte against the `Origin` header, so
/// it must already be in `scheme://host[:port]` form.
#[must_use]
pub fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let allowed = allowed_origin.to_owned();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request| origin.as_bytes() == allowed.as_bytes(),
        ))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}
