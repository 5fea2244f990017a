//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered user accounts.
    ///
    /// `username` and `email` each carry a unique index; the store relies on
    /// them as the final authority when concurrent registrations race.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        first_name -> Text,
        last_name -> Text,
        /// Token charset only (`[A-Za-z0-9_]+`), unique.
        username -> Text,
        /// Unique contact email.
        email -> Text,
        /// Argon2id PHC string; never plaintext.
        password_hash -> Text,
        birthdate -> Date,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
