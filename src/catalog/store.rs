//! In-memory record store
//!
//! Owns the canonical record map and the author, genre and title indexes.
//!
//! # API
//!
//! - `add(requests)` - Store a batch, one write-lock acquisition per request
//! - `remove(id)` - Drop a record and its title entry
//! - `search(attribute, value)` - Point or multi-value lookup
//! - `all_books()` - Every live record, unspecified order
//!
//! # Invariants
//!
//! - Every identifier in the title index exists in the record map
//! - Titles are unique
//! - Identifiers only increase and are never reused
//! - Readers hold the shared lock, so an index and the record map are never
//!   observed out of step

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};

use super::errors::{StoreError, StoreResult};
use super::index::{PostingIndex, UniqueIndex};
use super::record::{AddBookRequest, AddOutcome, Book, BookId};
use super::search::SearchAttribute;

/// What removal does to the author and genre indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Leave identifiers in place; searches filter them against the record map
    #[default]
    Lazy,
    /// Retract the identifier from every author and genre key
    Prune,
}

impl RemovalPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemovalPolicy::Lazy => "lazy",
            RemovalPolicy::Prune => "prune",
        }
    }
}

/// Sizes of the secondary indexes.
///
/// Under the lazy removal policy the posting counts include dangling
/// identifiers, so they can exceed the live record count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub titles: usize,
    pub author_keys: usize,
    pub author_postings: usize,
    pub genre_keys: usize,
    pub genre_postings: usize,
}

/// The store's operations as seen by collaborators
pub trait Inventory: Send + Sync {
    /// Add a non-empty batch of books.
    ///
    /// Duplicate titles are reported per request and do not stop the batch.
    fn add(&self, requests: Vec<AddBookRequest>) -> StoreResult<Vec<AddOutcome>>;

    /// Remove a book by identifier
    fn remove(&self, id: &str) -> StoreResult<()>;

    /// Look books up by `id`, `title`, `author` or `genre`
    fn search(&self, attribute: &str, value: &str) -> StoreResult<Vec<Book>>;

    /// Every live book, in no particular order
    fn all_books(&self) -> StoreResult<Vec<Book>>;
}

/// Record map plus derived indexes. Only touched under the store lock.
#[derive(Debug)]
struct Tables {
    records: HashMap<BookId, Book>,
    by_author: PostingIndex,
    by_genre: PostingIndex,
    by_title: UniqueIndex,
    next_id: BookId,
}

impl Tables {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            by_author: PostingIndex::new(),
            by_genre: PostingIndex::new(),
            by_title: UniqueIndex::new(),
            next_id: BookId::FIRST,
        }
    }

    fn index_book(&mut self, book: &Book) {
        for author in &book.authors {
            self.by_author.insert(author, book.id);
        }
        self.by_genre.insert(&book.genre, book.id);
    }

    fn unindex_book(&mut self, book: &Book) {
        for author in &book.authors {
            self.by_author.remove(author, book.id);
        }
        self.by_genre.remove(&book.genre, book.id);
    }

    fn index_stats(&self) -> IndexStats {
        IndexStats {
            titles: self.by_title.len(),
            author_keys: self.by_author.key_count(),
            author_postings: self.by_author.posting_count(),
            genre_keys: self.by_genre.key_count(),
            genre_postings: self.by_genre.posting_count(),
        }
    }

    /// Live books for a search, or `None` when nothing matches
    fn find(&self, attribute: SearchAttribute, value: &str) -> Option<Vec<Book>> {
        let books = match attribute {
            SearchAttribute::Id => {
                let id = value.parse::<BookId>().ok()?;
                vec![self.records.get(&id)?.clone()]
            }
            SearchAttribute::Title => self.materialize(&[self.by_title.get(value)?]),
            SearchAttribute::Author => self.materialize(self.by_author.lookup(value)?),
            SearchAttribute::Genre => self.materialize(self.by_genre.lookup(value)?),
        };

        if books.is_empty() {
            None
        } else {
            Some(books)
        }
    }

    /// Materialize identifiers, skipping any that no longer exist
    fn materialize(&self, ids: &[BookId]) -> Vec<Book> {
        ids.iter()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }
}

/// Thread-safe in-memory inventory.
///
/// Independent instances share nothing; wrap one in an `Arc` to share it.
#[derive(Debug)]
pub struct InMemoryInventory {
    /// Correlates log lines from this instance
    instance_id: Uuid,
    policy: RemovalPolicy,
    tables: RwLock<Tables>,
    metrics: MetricsRegistry,
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryInventory {
    /// Creates an empty store with the lazy removal policy
    pub fn new() -> Self {
        Self::with_policy(RemovalPolicy::default())
    }

    pub fn with_policy(policy: RemovalPolicy) -> Self {
        let store = Self {
            instance_id: Uuid::new_v4(),
            policy,
            tables: RwLock::new(Tables::new()),
            metrics: MetricsRegistry::new(),
        };
        let instance = store.instance_id.to_string();
        log_event_with_fields(
            Event::StoreOpened,
            &[("removal_policy", policy.as_str()), ("store", instance.as_str())],
        );
        store
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn removal_policy(&self) -> RemovalPolicy {
        self.policy
    }

    /// Number of live records
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn index_stats(&self) -> StoreResult<IndexStats> {
        Ok(self.read()?.index_stats())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Store a single book under its own write-lock acquisition.
    ///
    /// Fails with `AlreadyPresent` if the title is taken.
    fn add_one(&self, request: AddBookRequest) -> StoreResult<Book> {
        let mut tables = self.write()?;

        let id = tables.next_id;
        if let Err(existing) = tables.by_title.claim(&request.title, id) {
            return Err(StoreError::AlreadyPresent {
                title: request.title,
                existing,
            });
        }
        tables.next_id = id.next();

        let book = Book::from_request(id, request, Utc::now());
        tables.index_book(&book);
        tables.records.insert(id, book.clone());

        Ok(book)
    }

    fn reject_batch(&self, cause: &StoreError) {
        self.metrics.increment_batches_rejected();
        let reason = cause.to_string();
        log_event_with_fields(
            Event::BatchRejected,
            &[("code", cause.code()), ("reason", reason.as_str())],
        );
    }
}

impl Inventory for InMemoryInventory {
    fn add(&self, requests: Vec<AddBookRequest>) -> StoreResult<Vec<AddOutcome>> {
        let checked = if requests.is_empty() {
            Err(StoreError::MissingParameter("requests"))
        } else {
            requests.iter().try_for_each(AddBookRequest::validate)
        };
        if let Err(e) = checked {
            self.reject_batch(&e);
            return Err(e);
        }

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            match self.add_one(request) {
                Ok(book) => {
                    self.metrics.increment_books_added();
                    let id = book.id.to_string();
                    log_event_with_fields(
                        Event::BookAdded,
                        &[("id", id.as_str()), ("title", book.title.as_str())],
                    );
                    outcomes.push(AddOutcome::Added(book));
                }
                Err(StoreError::AlreadyPresent { title, existing }) => {
                    self.metrics.increment_duplicates_skipped();
                    let owner = existing.to_string();
                    log_event_with_fields(
                        Event::DuplicateSkipped,
                        &[("existing", owner.as_str()), ("title", title.as_str())],
                    );
                    outcomes.push(AddOutcome::Duplicate { title, existing });
                }
                Err(e) => {
                    self.reject_batch(&e);
                    return Err(StoreError::BatchAborted(Box::new(e)));
                }
            }
        }

        Ok(outcomes)
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let book_id: BookId = id.parse()?;

        let mut tables = self.write()?;
        let book = tables
            .records
            .remove(&book_id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        tables.by_title.release(&book.title);
        if self.policy == RemovalPolicy::Prune {
            tables.unindex_book(&book);
        }
        drop(tables);

        self.metrics.increment_books_removed();
        log_event_with_fields(Event::BookRemoved, &[("id", id), ("title", book.title.as_str())]);
        Ok(())
    }

    fn search(&self, attribute: &str, value: &str) -> StoreResult<Vec<Book>> {
        let result = if attribute.is_empty() || value.is_empty() {
            Err(StoreError::MissingParameter(if attribute.is_empty() {
                "attribute"
            } else {
                "value"
            }))
        } else {
            attribute.parse::<SearchAttribute>().and_then(|attr| {
                let tables = self.read()?;
                tables
                    .find(attr, value)
                    .ok_or_else(|| StoreError::NoMatch {
                        attribute: attr.to_string(),
                        value: value.to_string(),
                    })
            })
        };

        match &result {
            Ok(books) => {
                self.metrics.increment_searches_executed();
                let hits = books.len().to_string();
                log_event_with_fields(
                    Event::SearchExecuted,
                    &[("attribute", attribute), ("hits", hits.as_str()), ("value", value)],
                );
            }
            Err(e) => {
                self.metrics.increment_searches_failed();
                log_event_with_fields(
                    Event::SearchFailed,
                    &[("attribute", attribute), ("code", e.code()), ("value", value)],
                );
            }
        }
        result
    }

    fn all_books(&self) -> StoreResult<Vec<Book>> {
        Ok(self.read()?.records.values().cloned().collect())
    }
}
