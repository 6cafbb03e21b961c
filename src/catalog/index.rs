//! Secondary index structures
//!
//! Multi-valued indexes (author, genre) use BTreeMap<String, Vec<BookId>>.
//! Identifiers under a key keep insertion order, which is also assignment
//! order because identifiers are handed out under the store's write lock.

use std::collections::{BTreeMap, HashMap};

use super::record::BookId;

/// Multi-valued index: one key maps to many books.
#[derive(Debug, Default)]
pub(crate) struct PostingIndex {
    postings: BTreeMap<String, Vec<BookId>>,
}

impl PostingIndex {
    pub fn new() -> Self {
        Self {
            postings: BTreeMap::new(),
        }
    }

    /// Append an identifier under a key.
    ///
    /// Callers insert in increasing identifier order, so a repeat can only be
    /// the last entry; re-inserting it is a no-op.
    pub fn insert(&mut self, key: &str, id: BookId) {
        let ids = self.postings.entry(key.to_string()).or_default();
        if ids.last() != Some(&id) {
            ids.push(id);
        }
    }

    /// Remove an identifier from a key.
    ///
    /// If the key has no more identifiers, removes the key entirely.
    pub fn remove(&mut self, key: &str, id: BookId) {
        if let Some(ids) = self.postings.get_mut(key) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.postings.remove(key);
            }
        }
    }

    /// Identifiers listed under a key, in insertion order.
    ///
    /// `None` when the key was never indexed (or pruned away).
    pub fn lookup(&self, key: &str) -> Option<&[BookId]> {
        self.postings.get(key).map(|ids| ids.as_slice())
    }

    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Total number of identifiers across all keys
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(|v| v.len()).sum()
    }
}

/// Unique index: one title maps to exactly one book.
#[derive(Debug, Default)]
pub(crate) struct UniqueIndex {
    entries: HashMap<String, BookId>,
}

impl UniqueIndex {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Claim a key for an identifier.
    ///
    /// Returns the current owner if the key is already taken; the index is
    /// left unchanged in that case.
    pub fn claim(&mut self, key: &str, id: BookId) -> Result<(), BookId> {
        match self.entries.get(key) {
            Some(owner) => Err(*owner),
            None => {
                self.entries.insert(key.to_string(), id);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<BookId> {
        self.entries.get(key).copied()
    }

    pub fn release(&mut self, key: &str) -> Option<BookId> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
