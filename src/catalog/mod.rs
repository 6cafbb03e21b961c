//! Record store subsystem for catalogdb
//!
//! The record map is the source of truth. The author, genre and title indexes
//! are derived from it and updated under the same lock.
//!
//! # Design Principles
//!
//! - In-memory only: No persistence
//! - Shared-read / exclusive-write locking per record operation
//! - Identifiers are assigned by the store and never reused
//!
//! # Invariants
//!
//! - Titles are unique
//! - Author and genre searches only ever return live records
//! - Under the lazy removal policy, author and genre postings may dangle

mod errors;
mod index;
mod record;
mod search;
mod store;

pub use errors::{StoreError, StoreResult};
pub use record::{AddBookRequest, AddOutcome, Book, BookId};
pub use search::SearchAttribute;
pub use store::{InMemoryInventory, IndexStats, Inventory, RemovalPolicy};
