//! CORS middleware
//!
//! Preflight requests are answered here with 204 on any path, before
//! routing; every other response gets the configured allow-origin header.

use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::cors::{ALLOW_HEADERS, ALLOW_METHODS};

/// Header values applied by [`cors`]
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    origin: HeaderValue,
}

impl CorsHeaders {
    pub fn new(origin: HeaderValue) -> Self {
        Self { origin }
    }

    fn preflight(&self) -> Response {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        response
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`
pub async fn cors(State(headers): State<CorsHeaders>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        tracing::debug!(path = %request.uri().path(), "preflight");
        return headers.preflight();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, headers.origin.clone());
    response
}
