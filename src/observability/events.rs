//! Observable lifecycle events
//!
//! Events are explicit and typed. Per-request detail goes through plain
//! `tracing` calls; these names mark process and invocation milestones.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration resolved from flags and environment
    ConfigLoaded,
    /// Listener bound, ready to serve
    Serving,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,

    // Function invocations
    /// Invocation received
    InvocationBegin,
    /// Invocation produced a response
    InvocationComplete,
    /// Invocation failed to produce a response
    InvocationFailed,

    // One-shot commands
    /// CLI command finished
    CommandComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "CONTACTS_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "CONTACTS_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::InvocationBegin => "INVOCATION_BEGIN",
            Event::InvocationComplete => "INVOCATION_COMPLETE",
            Event::InvocationFailed => "INVOCATION_FAILED",

            Event::CommandComplete => "COMMAND_COMPLETE",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::InvocationFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
