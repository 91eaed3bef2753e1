//! Observability for the contacts service
//!
//! - Structured logging through `tracing`
//! - Lifecycle events named by [`Event`]
//!
//! # Usage
//!
//! ```ignore
//! use crm_contacts::observability::{self, Event, LogFormat};
//!
//! observability::init(LogFormat::Json);
//! observability::log_event(Event::Serving, "listening");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init, LogFormat, DEFAULT_FILTER};

/// Log a lifecycle event at the severity its kind implies
pub fn log_event(event: Event, message: &str) {
    if event.is_failure() {
        tracing::error!(event = event.as_str(), "{}", message);
    } else {
        tracing::info!(event = event.as_str(), "{}", message);
    }
}
