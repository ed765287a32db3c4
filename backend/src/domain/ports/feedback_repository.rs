//! Persistence port for feedback records.

use async_trait::async_trait;

use crate::domain::{Feedback, FeedbackId, NewFeedback};

/// Failures surfaced by feedback persistence adapters.
///
/// Adapters map these to transport responses; the distinction exists so
/// connection problems can be logged differently from query problems, but
/// both end up as generic server errors on the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackPersistenceError {
    /// The store could not be reached or a connection could not be obtained.
    #[error("feedback store unavailable: {message}")]
    Connection {
        /// Adapter-supplied description, never shown to clients.
        message: String,
    },
    /// A statement failed or returned malformed data.
    #[error("feedback store query failed: {message}")]
    Query {
        /// Adapter-supplied description, never shown to clients.
        message: String,
    },
}

impl FeedbackPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Store operations over feedback records.
///
/// Each operation is a single statement; records are never updated in place,
/// so implementations need no transactions or locking.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a submission and return the stored record with its
    /// store-assigned identifier and timestamps.
    async fn insert(&self, submission: NewFeedback) -> Result<Feedback, FeedbackPersistenceError>;

    /// Return every stored record ordered by creation time, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Feedback>, FeedbackPersistenceError>;

    /// Remove the record with the given identifier. Returns `false` when no
    /// such record exists.
    async fn delete_by_id(&self, id: &FeedbackId) -> Result<bool, FeedbackPersistenceError>;
}
