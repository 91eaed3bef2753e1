//! # HTTP Server
//!
//! Native HTTP entry point: the contacts routes, the health check, CORS and
//! request tracing, served until the shutdown token is cancelled.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::header::InvalidHeaderValue;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::contacts_routes::{contacts_routes, not_found};
use super::cors::{cors, CorsHeaders};
use super::observability_routes::health_routes;
use crate::api::ContactsApi;
use crate::observability::{log_event, Event};

/// HTTP Server for the contacts API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server; fails if the configured origin is not a valid header value
    pub fn new(config: HttpServerConfig, api: ContactsApi) -> Result<Self, InvalidHeaderValue> {
        let router = Self::build_router(&config, api)?;
        Ok(Self { config, router })
    }

    /// Build the combined router
    pub fn build_router(
        config: &HttpServerConfig,
        api: ContactsApi,
    ) -> Result<Router, InvalidHeaderValue> {
        let cors_headers = CorsHeaders::new(config.origin_header()?);

        Ok(Router::new()
            .merge(health_routes(Instant::now()))
            .merge(contacts_routes(api))
            .fallback(not_found)
            // Preflight is answered before routing
            .layer(middleware::from_fn_with_state(cors_headers, cors))
            .layer(TraceLayer::new_for_http()))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until `shutdown` is cancelled
    pub async fn start(self, shutdown: CancellationToken) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        log_event(Event::Serving, &format!("contacts API on http://{}/contacts", addr));
        tracing::info!(origin = %self.config.cors_origin, "health check at http://{}/health", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        log_event(Event::ShutdownComplete, "HTTP server stopped");
        Ok(())
    }
}
