//! Ports implemented by outbound adapters.

pub mod feedback_repository;

pub use self::feedback_repository::{FeedbackPersistenceError, FeedbackRepository};
