//! # Function Host
//!
//! Serves the function over plain HTTP: every request, on any path, becomes
//! an invocation and the produced response is written back verbatim.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use super::errors::{FunctionError, FunctionResult};
use super::invoker::Invoker;
use super::request::FunctionRequest;
use super::response::FunctionResponse;
use crate::observability::{log_event, Event};

/// Router sending every request to the invoker
pub fn function_routes(invoker: Invoker) -> Router {
    Router::new()
        .fallback(invoke_handler)
        .with_state(invoker)
        .layer(TraceLayer::new_for_http())
}

async fn invoke_handler(
    State(invoker): State<Invoker>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    query: Option<Query<HashMap<String, String>>>,
    body: Bytes,
) -> Response {
    let request = to_function_request(&method, &uri, &headers, query.map(|Query(q)| q), &body);
    let result = invoker.invoke(request).await;

    match to_http_response(result.response) {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(invocation_id = %result.id, "{}", err);
            let status =
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, err.to_string()).into_response()
        }
    }
}

/// Translate a native request into the invocation model
pub fn to_function_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    query: Option<HashMap<String, String>>,
    body: &[u8],
) -> FunctionRequest {
    let mut request = FunctionRequest::new(method.as_str(), uri.path())
        .with_body(String::from_utf8_lossy(body).into_owned());
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }
    request.query = query.unwrap_or_default();
    request
}

/// Translate a finished function response into a native one
pub fn to_http_response(response: FunctionResponse) -> FunctionResult<Response> {
    let status = StatusCode::from_u16(response.status_code).map_err(|_| {
        FunctionError::InvalidResponse(format!("status code {}", response.status_code))
    })?;

    let mut builder = axum::http::Response::builder().status(status);
    for (name, value) in &response.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| FunctionError::InvalidResponse(format!("header name {:?}", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| FunctionError::InvalidResponse(format!("header {} value", name)))?;
        builder = builder.header(name, value);
    }

    builder
        .body(Body::from(response.body))
        .map_err(|e| FunctionError::InvalidResponse(e.to_string()))
}

/// HTTP host for the contacts function
pub struct FunctionHost {
    addr: String,
    router: Router,
}

impl FunctionHost {
    pub fn new(addr: impl Into<String>, invoker: Invoker) -> Self {
        Self {
            addr: addr.into(),
            router: function_routes(invoker),
        }
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until `shutdown` is cancelled
    pub async fn start(self, shutdown: CancellationToken) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.addr.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", self.addr, e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event(
            Event::Serving,
            &format!("contacts function on http://{}", listener.local_addr()?),
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        log_event(Event::ShutdownComplete, "function host stopped");
        Ok(())
    }
}
