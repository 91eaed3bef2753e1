//! CLI module for crm-contacts
//!
//! Provides command-line interface for:
//! - serve: HTTP server for the contacts API
//! - function: local host for the serverless function
//! - invoke: one-shot function invocation
//! - list / delete: one-shot store operations

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, CollectionArgs, Command, FunctionArgs, ListenArgs, StoreArgs};
pub use commands::{delete, document_client, function, invoke, list, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_json};
