//! Internal Diesel row structs.
//!
//! Implementation details of the persistence adapter; never exposed to the
//! domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::feedbacks;

/// Row struct for reading from the feedbacks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feedbacks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedbackRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating feedback records. Timestamps come from the
/// column defaults so the database clock is the single source of truth.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedbacks)]
pub(crate) struct NewFeedbackRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub message: &'a str,
    pub category: &'a str,
}
