//! Metrics registry for catalogdb
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only when the owning store is created
//! - Thread-safe but lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one record store
///
/// Uses Relaxed ordering: counters are observational and never gate behavior.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    books_added: AtomicU64,
    duplicates_skipped: AtomicU64,
    batches_rejected: AtomicU64,
    books_removed: AtomicU64,
    searches_executed: AtomicU64,
    /// Searches that errored or matched nothing
    searches_failed: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_books_added(&self) {
        self.books_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_duplicates_skipped(&self) {
        self.duplicates_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_batches_rejected(&self) {
        self.batches_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_books_removed(&self) {
        self.books_removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_searches_executed(&self) {
        self.searches_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_searches_failed(&self) {
        self.searches_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            books_added: self.books_added.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::Relaxed),
            batches_rejected: self.batches_rejected.load(Ordering::Relaxed),
            books_removed: self.books_removed.load(Ordering::Relaxed),
            searches_executed: self.searches_executed.load(Ordering::Relaxed),
            searches_failed: self.searches_failed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub books_added: u64,
    pub duplicates_skipped: u64,
    pub batches_rejected: u64,
    pub books_removed: u64,
    pub searches_executed: u64,
    pub searches_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_zero_values() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_increment_counters() {
        let registry = MetricsRegistry::new();

        registry.increment_books_added();
        registry.increment_books_added();
        registry.increment_duplicates_skipped();
        registry.increment_batches_rejected();
        registry.increment_books_removed();
        registry.increment_searches_executed();
        registry.increment_searches_failed();

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.books_added, 2);
        assert_eq!(snapshot.duplicates_skipped, 1);
        assert_eq!(snapshot.batches_rejected, 1);
        assert_eq!(snapshot.books_removed, 1);
        assert_eq!(snapshot.searches_executed, 1);
        assert_eq!(snapshot.searches_failed, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = MetricsRegistry::new();
        registry.increment_searches_executed();

        let value = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(value["searches_executed"], 1);
        assert_eq!(value["books_added"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(MetricsRegistry::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let reg = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    reg.increment_books_added();
                    reg.increment_searches_executed();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.books_added, 1000);
        assert_eq!(snapshot.searches_executed, 1000);
    }
}
