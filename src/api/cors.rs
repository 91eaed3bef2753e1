//! CORS header values shared by both entry points

use axum::http::header::{
    HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};

/// Origin used when none is configured
pub const DEFAULT_ORIGIN: &str = "*";

pub const ALLOW_METHODS: &str = "POST, GET, DELETE, OPTIONS";

pub const ALLOW_HEADERS: &str = "Content-Type";

/// Header carried by every response
pub fn origin_header(origin: &str) -> (HeaderName, String) {
    (ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string())
}

/// Headers of a preflight response
pub fn preflight_headers(origin: &str) -> Vec<(HeaderName, String)> {
    vec![
        origin_header(origin),
        (ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS.to_string()),
        (ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS.to_string()),
    ]
}
