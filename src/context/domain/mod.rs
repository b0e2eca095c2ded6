//! Domain model for context entries.

mod entry;
mod error;
mod window;

pub use entry::{
    ContextContent, ContextEntry, ContextEntryId, EntryType, NewContextEntry,
    PersistedContextEntryData,
};
pub use error::{ContextDomainError, ParseEntryTypeError};
pub use window::ContextWindow;
