//! In-memory adapters for context persistence.

mod entry;

pub use entry::InMemoryContextRepository;
