//! crm-contacts - contact CRUD over a hosted document database
//!
//! One routing contract (`api`), two entry points: a native HTTP server
//! (`http_server`) and a serverless function (`functions`).

pub mod api;
pub mod cli;
pub mod functions;
pub mod http_server;
pub mod observability;
pub mod store;
