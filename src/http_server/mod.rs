//! # HTTP Server Module
//!
//! Native HTTP entry point for the contacts API, built on axum.
//!
//! # Endpoints
//!
//! - `/contacts` - list, upsert, delete
//! - `/health` - Health check
//! - `OPTIONS` on any path - CORS preflight

pub mod config;
pub mod contacts_routes;
pub mod cors;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
