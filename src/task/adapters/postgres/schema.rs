//! Diesel schema for task persistence.

diesel::table! {
    /// Tasks owned by users.
    tasks (id) {
        /// Store-generated identifier.
        id -> Int8,
        /// Owning user.
        user_id -> Int8,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Authoritative priority (1 high to 3 low).
        priority -> Int4,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Authoritative deadline.
        deadline -> Nullable<Timestamptz>,
        /// Advisory priority suggested at creation.
        ai_suggested_priority -> Nullable<Int4>,
        /// Advisory deadline suggested at creation.
        ai_suggested_deadline -> Nullable<Timestamptz>,
        /// Reasoning returned with the suggestion.
        ai_reasoning -> Nullable<Text>,
        /// Ordered context tags as a JSON array of strings.
        context_tags -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}
