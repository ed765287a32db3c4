//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod error;
pub mod feedback;
pub mod health;
pub mod state;

pub use error::{ApiError, ApiResult};

use actix_web::{web, Scope};

/// The `/api` scope with every feedback endpoint mounted.
///
/// Shared between the server bootstrap and the integration tests so both
/// exercise identical routing.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(feedback::submit_feedback)
        .service(feedback::list_feedbacks)
        .service(feedback::delete_feedback)
}
