//! catalogdb - An in-memory, concurrently indexed book catalog
//!
//! - `catalog`: record store with author, genre and title indexes
//! - `library`: domain facade over the store
//! - `observability`: JSON logging, events, counters
//! - `cli`: shell, serve and demo front ends

pub mod catalog;
pub mod cli;
pub mod library;
pub mod observability;
