//! Domain types and ports for the feedback service.
//!
//! Everything in this module is transport agnostic: HTTP adapters translate
//! these types to and from the wire, persistence adapters to and from rows.
//! Invariants live on the types themselves so adapters cannot construct
//! invalid records.

pub mod admin;
pub mod error;
pub mod feedback;
pub mod ports;

pub use self::admin::AdminSecret;
pub use self::error::{DomainError, ErrorCode};
pub use self::feedback::{
    AuthorEmail, AuthorName, Category, Feedback, FeedbackId, FeedbackValidationError, MessageBody,
    NewFeedback,
};
