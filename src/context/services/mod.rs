//! Application services for context capture and retrieval.

mod journal;

pub use journal::{
    ContextJournalError, ContextJournalResult, ContextJournalService, RecordContextRequest,
};
