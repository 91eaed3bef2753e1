//! API Layer for contacts
//!
//! The routing contract shared by the HTTP server and the serverless
//! function: one path, three methods, JSON in and out.
//!
//! # Supported Operations
//!
//! - `GET /contacts` - list
//! - `POST /contacts` - batch upsert
//! - `DELETE /contacts` - delete one (`?id=` or body `id`) or all
//! - `OPTIONS` on any path - CORS preflight

pub mod cors;
mod errors;
mod handler;
mod request;
mod response;

/// The only routed path
pub const CONTACTS_PATH: &str = "/contacts";

pub use errors::{ApiError, ApiResult, ErrorBody};
pub use handler::ContactsApi;
pub use request::{delete_target, parse_body, parse_upsert_body, Operation, Request};
pub use response::{DeleteResponse, Response};
