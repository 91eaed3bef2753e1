//! # Function Invoker

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::{InvocationContext, LogLine};
use super::handler::ContactsFunction;
use super::request::FunctionRequest;
use super::response::FunctionResponse;
use crate::observability::{log_event, Event};

/// Result of function invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Invocation ID
    pub id: Uuid,

    pub response: FunctionResponse,

    /// Logs produced
    pub logs: Vec<LogLine>,

    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl InvocationResult {
    /// True for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.response.status_code)
    }
}

/// Function invoker
#[derive(Debug, Clone)]
pub struct Invoker {
    function: Arc<ContactsFunction>,
}

impl Invoker {
    /// Create a new invoker
    pub fn new(function: ContactsFunction) -> Self {
        Self {
            function: Arc::new(function),
        }
    }

    /// Invoke the function with a fresh context
    pub async fn invoke(&self, request: FunctionRequest) -> InvocationResult {
        let ctx = InvocationContext::new(request);
        tracing::debug!(
            event = Event::InvocationBegin.as_str(),
            invocation_id = %ctx.id,
            method = %ctx.req.method,
            path = %ctx.req.path,
            "invocation received"
        );

        let started = Instant::now();
        let response = self.function.run(&ctx).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let result = InvocationResult {
            id: ctx.id,
            response,
            logs: ctx.logs().drain(),
            duration_ms,
        };

        let event = if result.response.status_code >= 500 {
            Event::InvocationFailed
        } else {
            Event::InvocationComplete
        };
        log_event(
            event,
            &format!(
                "{} {} -> {} in {}ms",
                ctx.req.method, ctx.req.path, result.response.status_code, duration_ms
            ),
        );

        result
    }
}
