use std::sync::Arc;

use crate::catalog::{AddBookRequest, AddOutcome, Book, Inventory, SearchAttribute, StoreError};

use super::errors::{LibraryError, LibraryResult};

/// Domain-level entry point over any `Inventory`
#[derive(Clone)]
pub struct Library {
    inventory: Arc<dyn Inventory>,
}

impl Library {
    pub fn new(inventory: Arc<dyn Inventory>) -> Self {
        Self { inventory }
    }

    /// Add a batch of books, reporting duplicates per request
    pub fn add(&self, requests: Vec<AddBookRequest>) -> LibraryResult<Vec<AddOutcome>> {
        self.inventory.add(requests).map_err(LibraryError::Add)
    }

    /// Remove the book with this title
    pub fn remove(&self, title: &str) -> LibraryResult<Book> {
        let book = self
            .inventory
            .search(SearchAttribute::Title.as_str(), title)
            .map_err(|source| LibraryError::FindForRemoval {
                title: title.to_string(),
                source,
            })?
            .into_iter()
            .next()
            .ok_or_else(|| LibraryError::FindForRemoval {
                title: title.to_string(),
                source: no_title_match(title),
            })?;

        let id = book.id.to_string();
        self.inventory
            .remove(&id)
            .map_err(|source| LibraryError::Remove { id, source })?;

        Ok(book)
    }

    pub fn search_by_author(&self, name: &str) -> LibraryResult<Vec<Book>> {
        self.search(SearchAttribute::Author, name)
    }

    pub fn search_by_genre(&self, name: &str) -> LibraryResult<Vec<Book>> {
        self.search(SearchAttribute::Genre, name)
    }

    pub fn search_by_title(&self, title: &str) -> LibraryResult<Book> {
        self.search(SearchAttribute::Title, title)?
            .into_iter()
            .next()
            .ok_or_else(|| LibraryError::Search {
                field: SearchAttribute::Title.as_str(),
                value: title.to_string(),
                source: no_title_match(title),
            })
    }

    /// Every book, ordered by identifier
    pub fn all_books(&self) -> LibraryResult<Vec<Book>> {
        let mut books = self.inventory.all_books().map_err(LibraryError::List)?;
        books.sort_by_key(|b| b.id);
        Ok(books)
    }

    fn search(&self, attribute: SearchAttribute, value: &str) -> LibraryResult<Vec<Book>> {
        self.inventory
            .search(attribute.as_str(), value)
            .map_err(|source| LibraryError::Search {
                field: attribute.as_str(),
                value: value.to_string(),
                source,
            })
    }
}

fn no_title_match(title: &str) -> StoreError {
    StoreError::NoMatch {
        attribute: SearchAttribute::Title.to_string(),
        value: title.to_string(),
    }
}
