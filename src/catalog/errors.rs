//! Record store error types
//!
//! Error codes:
//! - CATALOG_ALREADY_PRESENT
//! - CATALOG_NOT_FOUND
//! - CATALOG_MISSING_PARAMETER
//! - CATALOG_INVALID_ATTRIBUTE
//! - CATALOG_NO_MATCH
//! - CATALOG_LOCK_POISONED
//! - CATALOG_BATCH_ABORTED
//!
//! None of these are fatal. The store never panics on a logic error.

use thiserror::Error;

use super::record::BookId;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A book with this title is already stored
    #[error("book already present in inventory: {title}")]
    AlreadyPresent { title: String, existing: BookId },

    /// No book with this identifier
    #[error("book not found: {0}")]
    NotFound(String),

    /// A required parameter was empty
    #[error("required parameter missing: {0}")]
    MissingParameter(&'static str),

    /// Search attribute is not one of id, title, author, genre
    #[error("invalid attribute provided: {0}")]
    InvalidAttribute(String),

    /// Valid attribute, but nothing is indexed under the value
    #[error("no book matches {attribute} = {value}")]
    NoMatch { attribute: String, value: String },

    #[error("store lock poisoned")]
    LockPoisoned,

    /// A non-duplicate failure stopped a batch add
    #[error("error while adding books to inventory: {0}")]
    BatchAborted(Box<StoreError>),
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::AlreadyPresent { .. } => "CATALOG_ALREADY_PRESENT",
            StoreError::NotFound(_) => "CATALOG_NOT_FOUND",
            StoreError::MissingParameter(_) => "CATALOG_MISSING_PARAMETER",
            StoreError::InvalidAttribute(_) => "CATALOG_INVALID_ATTRIBUTE",
            StoreError::NoMatch { .. } => "CATALOG_NO_MATCH",
            StoreError::LockPoisoned => "CATALOG_LOCK_POISONED",
            StoreError::BatchAborted(_) => "CATALOG_BATCH_ABORTED",
        }
    }

    /// Whether the error means "nothing found" rather than a bad request
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::NoMatch { .. })
    }
}
