//! Diesel-backed [`FeedbackRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FeedbackPersistenceError, FeedbackRepository};
use crate::domain::{
    AuthorEmail, AuthorName, Category, Feedback, FeedbackId, MessageBody, NewFeedback,
};

use super::models::{FeedbackRow, NewFeedbackRow};
use super::pool::DbPool;
use super::schema::feedbacks;

/// PostgreSQL implementation of the feedback store.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(err: super::pool::PoolError) -> FeedbackPersistenceError {
    FeedbackPersistenceError::connection(err.to_string())
}

fn map_query_error(err: diesel::result::Error) -> FeedbackPersistenceError {
    FeedbackPersistenceError::query(err.to_string())
}

fn row_to_domain(row: FeedbackRow) -> Result<Feedback, FeedbackPersistenceError> {
    let FeedbackRow {
        id,
        name,
        email,
        message,
        category,
        created_at,
        updated_at,
    } = row;
    let submission = NewFeedback::new(
        AuthorName::new(name).map_err(invalid_row)?,
        AuthorEmail::new(email).map_err(invalid_row)?,
        MessageBody::new(message).map_err(invalid_row)?,
        Category::parse_or_general(&category),
    );
    Ok(Feedback::new(
        FeedbackId::from(id),
        submission,
        created_at,
        updated_at,
    ))
}

fn invalid_row(err: crate::domain::FeedbackValidationError) -> FeedbackPersistenceError {
    FeedbackPersistenceError::query(format!("stored record violates invariants: {err}"))
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn insert(&self, submission: NewFeedback) -> Result<Feedback, FeedbackPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFeedbackRow {
            id: Uuid::new_v4(),
            name: submission.name().as_ref(),
            email: submission.email().as_ref(),
            message: submission.message().as_ref(),
            category: submission.category().as_str(),
        };
        let stored: FeedbackRow = diesel::insert_into(feedbacks::table)
            .values(&row)
            .get_result(&mut conn)
            .await
            .map_err(map_query_error)?;
        row_to_domain(stored)
    }

    async fn list_newest_first(&self) -> Result<Vec<Feedback>, FeedbackPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FeedbackRow> = feedbacks::table
            .order(feedbacks::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;
        rows.into_iter().map(row_to_domain).collect()
    }

    async fn delete_by_id(&self, id: &FeedbackId) -> Result<bool, FeedbackPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(feedbacks::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_query_error)?;
        Ok(removed > 0)
    }
}
