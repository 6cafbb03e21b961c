//! Observability subsystem for catalogdb
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle and operation events
//! - Per-store atomic counters
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on store behavior
//! 3. No async or background threads
//! 4. A failed log write never fails an operation
//!
//! # Usage
//!
//! ```ignore
//! use catalogdb::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::BookRemoved, &[("id", "3")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
