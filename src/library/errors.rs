//! # Library Errors
//!
//! Every variant keeps the underlying store error as its source.

use thiserror::Error;

use crate::catalog::StoreError;

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Library errors
#[derive(Debug, Clone, Error)]
pub enum LibraryError {
    #[error("failed to add books to library")]
    Add(#[source] StoreError),

    #[error("failed to find book by title: {title}")]
    FindForRemoval {
        title: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to remove book {id} from library")]
    Remove {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to search books by {field}: {value}")]
    Search {
        field: &'static str,
        value: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to list books")]
    List(#[source] StoreError),
}

impl LibraryError {
    /// The store error underneath the context
    pub fn store_error(&self) -> &StoreError {
        match self {
            LibraryError::Add(e) | LibraryError::List(e) => e,
            LibraryError::FindForRemoval { source, .. }
            | LibraryError::Remove { source, .. }
            | LibraryError::Search { source, .. } => source,
        }
    }

    /// Stable code of the underlying store error
    pub fn code(&self) -> &'static str {
        self.store_error().code()
    }
}
