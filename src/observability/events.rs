//! Observability events for catalogdb
//!
//! Events are explicit and typed. Each one carries the severity it is
//! logged at.

use std::fmt;

use super::logger::Severity;

/// Observable events in catalogdb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// A record store was created
    StoreOpened,

    // Store operations
    /// A book was stored
    BookAdded,
    /// A request was skipped because its title is taken
    DuplicateSkipped,
    /// A batch add was refused or aborted
    BatchRejected,
    /// A book was removed
    BookRemoved,
    /// A search returned at least one book
    SearchExecuted,
    /// A search failed or matched nothing
    SearchFailed,

    // Front ends
    /// Interactive shell started
    ShellStart,
    /// Interactive shell exited
    ShellExit,
    /// JSON-lines loop is reading requests
    Serving,
    /// A serve request could not be handled
    RequestRejected,
    /// Demo run started
    DemoStart,
    /// Demo run finished
    DemoComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",

            Event::BookAdded => "BOOK_ADDED",
            Event::DuplicateSkipped => "DUPLICATE_SKIPPED",
            Event::BatchRejected => "BATCH_REJECTED",
            Event::BookRemoved => "BOOK_REMOVED",
            Event::SearchExecuted => "SEARCH_COMPLETE",
            Event::SearchFailed => "SEARCH_FAILED",

            Event::ShellStart => "SHELL_BEGIN",
            Event::ShellExit => "SHELL_EXIT",
            Event::Serving => "CATALOGDB_SERVING",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::DemoStart => "DEMO_BEGIN",
            Event::DemoComplete => "DEMO_COMPLETE",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BookAdded | Event::SearchExecuted | Event::SearchFailed => Severity::Trace,
            Event::DuplicateSkipped | Event::BatchRejected | Event::RequestRejected => {
                Severity::Warn
            }
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::StoreOpened,
            Event::BookAdded,
            Event::DuplicateSkipped,
            Event::BatchRejected,
            Event::BookRemoved,
            Event::SearchExecuted,
            Event::SearchFailed,
            Event::ShellStart,
            Event::ShellExit,
            Event::Serving,
            Event::RequestRejected,
            Event::DemoStart,
            Event::DemoComplete,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::BookAdded.severity(), Severity::Trace);
        assert_eq!(Event::BatchRejected.severity(), Severity::Warn);
        assert_eq!(Event::BookRemoved.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::StoreOpened), "STORE_OPENED");
    }
}
