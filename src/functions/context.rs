//! # Invocation Context
//!
//! Everything one invocation sees: the request, the response builder and
//! the `log` / `error` callables. Log lines are collected per invocation
//! and mirrored to `tracing`.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::FunctionRequest;
use super::response::ResponseBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Shared collector behind `log` / `error`
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl LogSink {
    fn push(&self, level: LogLevel, message: String) {
        let line = LogLine {
            level,
            message,
            timestamp: Utc::now(),
        };
        // A poisoned sink only loses log lines
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    /// Take the collected lines, leaving the sink empty
    pub fn drain(&self) -> Vec<LogLine> {
        self.lines
            .lock()
            .map(|mut lines| std::mem::take(&mut *lines))
            .unwrap_or_default()
    }
}

/// Invocation context passed to the function
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Invocation ID
    pub id: Uuid,

    pub req: FunctionRequest,

    pub res: ResponseBuilder,

    /// Invocation timestamp
    pub timestamp: DateTime<Utc>,

    logs: LogSink,
}

impl InvocationContext {
    pub fn new(req: FunctionRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            req,
            res: ResponseBuilder,
            timestamp: Utc::now(),
            logs: LogSink::default(),
        }
    }

    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(invocation_id = %self.id, "{}", message);
        self.logs.push(LogLevel::Log, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(invocation_id = %self.id, "{}", message);
        self.logs.push(LogLevel::Error, message);
    }

    pub fn logs(&self) -> &LogSink {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_are_collected_in_order() {
        let ctx = InvocationContext::new(FunctionRequest::new("GET", "/contacts"));
        ctx.log("first");
        ctx.error("second");

        let lines = ctx.logs().drain();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, LogLevel::Log);
        assert_eq!(lines[1].message, "second");
        assert!(ctx.logs().drain().is_empty());
    }

    #[test]
    fn test_log_level_serialization() {
        assert_eq!(serde_json::to_value(LogLevel::Error).unwrap(), "error");
    }
}
