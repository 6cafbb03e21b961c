//! Catalog Concurrency Tests
//!
//! Tests for behavior under parallel callers:
//! - Parallel adds with distinct titles get unique identifiers
//! - Parallel adds of one title store exactly one record
//! - Readers never see the title index and record map disagree
//! - Parallel batches interleave per record

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use catalogdb::catalog::{AddBookRequest, InMemoryInventory, Inventory, RemovalPolicy};
use catalogdb::library::Library;

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

// =============================================================================
// Writers
// =============================================================================

/// Distinct titles from many threads: every add lands, ids are unique.
#[test]
fn test_parallel_distinct_adds() {
    let store = Arc::new(InMemoryInventory::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let batch = (0..PER_THREAD)
                    .map(|i| AddBookRequest::new(format!("t{}-b{}", t, i), &["Ann"], "Fiction"))
                    .collect();
                store.add(batch).unwrap()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for outcome in handle.join().unwrap() {
            assert!(ids.insert(outcome.book().unwrap().id));
        }
    }

    assert_eq!(ids.len(), THREADS * PER_THREAD);
    assert_eq!(store.len().unwrap(), THREADS * PER_THREAD);
    assert_eq!(store.search("author", "Ann").unwrap().len(), THREADS * PER_THREAD);
    assert_eq!(ids.iter().map(|id| id.as_u64()).max(), Some((THREADS * PER_THREAD) as u64));
}

/// The same title from many threads: exactly one winner.
#[test]
fn test_parallel_same_title_single_winner() {
    let store = Arc::new(InMemoryInventory::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let author = format!("Author{}", t);
                store
                    .add(vec![AddBookRequest::new("Contested", &[author.as_str()], "Drama")])
                    .unwrap()
            })
        })
        .collect();

    let winners: usize = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|outcomes| !outcomes[0].is_duplicate())
        .count();

    assert_eq!(winners, 1);
    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(store.metrics().duplicates_skipped, (THREADS - 1) as u64);
}

/// Parallel batches may interleave, but each batch's ids follow its input order.
#[test]
fn test_batch_ids_increase_in_input_order() {
    let store = Arc::new(InMemoryInventory::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let batch = (0..PER_THREAD)
                    .map(|i| AddBookRequest::new(format!("{}:{}", t, i), &["Bo"], "Essay"))
                    .collect();
                store.add(batch).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let ids: Vec<_> = handle
            .join()
            .unwrap()
            .iter()
            .map(|o| o.book().unwrap().id)
            .collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}

// =============================================================================
// Readers Against Writers
// =============================================================================

/// While writers add and remove, every title hit is a live, matching record.
#[test]
fn test_readers_see_consistent_state() {
    for policy in [RemovalPolicy::Lazy, RemovalPolicy::Prune] {
        let store = Arc::new(InMemoryInventory::with_policy(policy));

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..200 {
                    let title = format!("Churn{}", i % 10);
                    let outcomes = store
                        .add(vec![AddBookRequest::new(title, &["Writer"], "Churn")])
                        .unwrap();
                    if let Some(book) = outcomes[0].book() {
                        store.remove(&book.id.to_string()).unwrap();
                    }
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..500 {
                        let title = format!("Churn{}", i % 10);
                        if let Ok(books) = store.search("title", &title) {
                            assert_eq!(books.len(), 1);
                            assert_eq!(books[0].title, title);
                        }
                        if let Ok(books) = store.search("author", "Writer") {
                            assert!(!books.is_empty());
                            assert!(books.iter().all(|b| b.authors == vec!["Writer"]));
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert!(store.is_empty().unwrap());
    }
}

/// The facade can be cloned across threads over one shared store.
#[test]
fn test_library_shared_across_threads() {
    let store = Arc::new(InMemoryInventory::new());
    let library = Library::new(store.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let library = library.clone();
            thread::spawn(move || {
                let title = format!("Shared{}", t);
                library
                    .add(vec![AddBookRequest::new(title.as_str(), &["Cy"], "Poetry")])
                    .unwrap();
                library.remove(&title).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(library.all_books().unwrap().is_empty());
    assert_eq!(store.metrics().books_removed, THREADS as u64);
}
