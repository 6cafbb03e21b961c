//! Catalog facade
//!
//! Translates domain requests (add, remove by title, search by field) into
//! record store calls and wraps failures with context.

mod errors;
mod facade;

pub use errors::{LibraryError, LibraryResult};
pub use facade::Library;
