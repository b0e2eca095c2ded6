//! Diesel schema for user persistence.

diesel::table! {
    /// Task owners keyed by email address.
    users (id) {
        /// Store-generated identifier.
        id -> Int8,
        /// Unique email address.
        #[max_length = 255]
        email -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Provisioning timestamp.
        created_at -> Timestamptz,
    }
}
