//! Diesel schema for context persistence.

diesel::table! {
    /// Dated context notes owned by users.
    context_entries (id) {
        /// Store-generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Entry text.
        content -> Text,
        /// Source kind.
        #[max_length = 20]
        entry_type -> Varchar,
        /// Date the entry refers to.
        entry_date -> Date,
        /// Capture timestamp.
        created_at -> Timestamptz,
    }
}
