//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the migrations under `migrations/` exactly.

diesel::table! {
    /// Stored feedback submissions.
    feedbacks (id) {
        /// Primary key: UUID v4 assigned on insert.
        id -> Uuid,
        /// Visitor name.
        name -> Varchar,
        /// Visitor contact email.
        email -> Varchar,
        /// Free-form feedback text.
        message -> Text,
        /// Category keyword; defaults to `general`.
        category -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Kept equal to `created_at`; records are never updated.
        updated_at -> Timestamptz,
    }
}
