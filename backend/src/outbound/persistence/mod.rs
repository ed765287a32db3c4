//! PostgreSQL persistence for feedback records.
//!
//! Diesel table definitions and row structs stay private to this module;
//! the rest of the crate sees only the [`FeedbackRepository`] port.
//!
//! [`FeedbackRepository`]: crate::domain::ports::FeedbackRepository

mod diesel_feedback_repository;
mod models;
mod pool;
mod schema;

pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
