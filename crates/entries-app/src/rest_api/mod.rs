pub mod entries;

use std::time::Duration;

use http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

pub const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

/// Permissive CORS, any origin can call the API.
/// Layer answers every OPTIONS request itself, no handler is involved.
pub fn cors_layer(max_age: Duration) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
        .max_age(max_age)
}
