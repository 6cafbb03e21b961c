//! Catalog records
//!
//! A `Book` is only ever built by the store. Callers describe what they want
//! stored with an `AddBookRequest` and get back an `AddOutcome` per request.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::StoreError;

/// Store-assigned book identifier.
///
/// Rendered and serialized as a decimal string. Ordering follows assignment order.
/// Only the canonical rendering parses back: "01" or "+1" name no identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BookId(u64);

impl BookId {
    /// The first identifier a fresh store hands out
    pub const FIRST: BookId = BookId(1);

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The identifier assigned after this one
    pub(crate) fn next(self) -> Self {
        BookId(self.0 + 1)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .ok()
            .filter(|n| *n > 0 && n.to_string() == s)
            .map(BookId)
            .ok_or_else(|| StoreError::NotFound(s.to_string()))
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for BookId {
    type Error = StoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A stored catalog entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub authors: Vec<String>,
    /// Opaque, never parsed
    pub price: String,
    /// Opaque, never parsed
    pub publication_year: String,
    pub genre: String,
    pub added_at: DateTime<Utc>,
}

impl Book {
    pub(crate) fn from_request(id: BookId, req: AddBookRequest, added_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: req.title,
            authors: req.authors,
            price: req.price,
            publication_year: req.publication_year,
            genre: req.genre,
            added_at,
        }
    }
}

/// Request to add one book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub publication_year: String,
    pub genre: String,
}

impl AddBookRequest {
    pub fn new(title: impl Into<String>, authors: &[&str], genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            genre: genre.into(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn with_publication_year(mut self, year: impl Into<String>) -> Self {
        self.publication_year = year.into();
        self
    }

    /// Checks required fields.
    ///
    /// Title, genre and every author name must contain more than whitespace;
    /// the author list must be non-empty.
    pub fn validate(&self) -> Result<(), StoreError> {
        if is_blank(&self.title) {
            return Err(StoreError::MissingParameter("title"));
        }
        if self.authors.is_empty() || self.authors.iter().any(|a| is_blank(a)) {
            return Err(StoreError::MissingParameter("authors"));
        }
        if is_blank(&self.genre) {
            return Err(StoreError::MissingParameter("genre"));
        }
        Ok(())
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Per-request result of a batch add
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddOutcome {
    /// Stored under a freshly assigned identifier
    Added(Book),
    /// Skipped: the title already belongs to `existing`
    Duplicate { title: String, existing: BookId },
}

impl AddOutcome {
    pub fn book(&self) -> Option<&Book> {
        match self {
            AddOutcome::Added(book) => Some(book),
            AddOutcome::Duplicate { .. } => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, AddOutcome::Duplicate { .. })
    }
}
