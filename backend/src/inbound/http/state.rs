//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the repository port and stay testable with in-memory stubs.

use std::sync::Arc;

use crate::domain::ports::FeedbackRepository;
use crate::domain::AdminSecret;

/// Dependency bundle for the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Feedback store the handlers read and write through.
    pub feedback: Arc<dyn FeedbackRepository>,
    /// Secret gating the admin endpoints.
    pub admin: AdminSecret,
}

impl HttpState {
    /// Bundle a repository and the admin secret for handler injection.
    pub fn new(feedback: Arc<dyn FeedbackRepository>, admin: AdminSecret) -> Self {
        Self { feedback, admin }
    }
}
