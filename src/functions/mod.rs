//! # Serverless Functions Module
//!
//! The contacts contract in the platform's invocation model: a request, a
//! response builder and `log` / `error` callables per invocation.
//!
//! - `handler` - the function itself
//! - `invoker` - runs one invocation, collects logs and timing
//! - `host` - serves the function over local HTTP

pub mod config;
pub mod context;
pub mod errors;
pub mod handler;
pub mod host;
pub mod invoker;
pub mod request;
pub mod response;

pub use config::{AppwriteProvider, ClientProvider, FunctionConfig, StaticProvider, KEY_HEADER};
pub use context::{InvocationContext, LogLevel, LogLine, LogSink};
pub use errors::{FunctionError, FunctionResult};
pub use handler::ContactsFunction;
pub use host::{function_routes, FunctionHost};
pub use invoker::{InvocationResult, Invoker};
pub use request::FunctionRequest;
pub use response::{FunctionResponse, ResponseBuilder};
