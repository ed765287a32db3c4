//! Feedback API handlers.
//!
//! ```text
//! POST   /api/submit-feedback        public
//! GET    /api/feedbacks              admin bearer credential
//! DELETE /api/feedbacks/{id}         admin bearer credential
//! ```

use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::FeedbackPersistenceError;
use crate::domain::{DomainError, Feedback, FeedbackId, FeedbackValidationError, NewFeedback};
use crate::inbound::http::auth::require_admin;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiError, ApiResult};

/// Request body for `POST /api/submit-feedback`.
///
/// Fields are optional at the serde layer so an absent field and an empty
/// field produce the same validation error instead of a framework-shaped
/// deserialisation failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SubmitFeedbackRequest {
    /// Visitor name.
    #[serde(default)]
    pub name: Option<String>,
    /// Visitor contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Feedback text.
    #[serde(default)]
    pub message: Option<String>,
    /// Optional category; defaults to `general`.
    #[serde(default)]
    pub category: Option<String>,
}

/// Confirmation body returned by the mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[schema(example = "Feedback submitted successfully.")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

fn map_validation_error(err: FeedbackValidationError) -> DomainError {
    let field = match err {
        FeedbackValidationError::EmptyName => "name",
        FeedbackValidationError::EmptyEmail => "email",
        FeedbackValidationError::EmptyMessage => "message",
        FeedbackValidationError::EmptyId | FeedbackValidationError::InvalidId => {
            // Identifier validation never applies to submissions.
            return DomainError::invalid_request(err.to_string());
        }
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn map_store_error(err: FeedbackPersistenceError) -> DomainError {
    DomainError::internal(err.to_string())
}

fn unknown_record(id: &str) -> ApiError {
    DomainError::not_found(format!("no feedback record with id {id}")).into()
}

/// Accept a public feedback submission.
#[utoipa::path(
    post,
    path = "/api/submit-feedback",
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored", body = MessageResponse),
        (status = 400, description = "Missing required field", body = ApiError),
        (status = 500, description = "Server error", body = ApiError)
    ),
    tags = ["feedback"],
    operation_id = "submitFeedback"
)]
#[post("/submit-feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitFeedbackRequest>,
) -> ApiResult<HttpResponse> {
    let SubmitFeedbackRequest {
        name,
        email,
        message,
        category,
    } = payload.into_inner();

    let submission = NewFeedback::try_from_parts(
        name.as_deref().unwrap_or_default(),
        email.as_deref().unwrap_or_default(),
        message.as_deref().unwrap_or_default(),
        category.as_deref(),
    )
    .map_err(map_validation_error)?;

    let record = state
        .feedback
        .insert(submission)
        .await
        .map_err(map_store_error)?;
    info!(id = %record.id(), category = %record.category(), "feedback stored");

    Ok(HttpResponse::Created().json(MessageResponse::new("Feedback submitted successfully.")))
}

/// List every feedback record, newest first.
#[utoipa::path(
    get,
    path = "/api/feedbacks",
    responses(
        (status = 200, description = "All records, newest first", body = [Feedback]),
        (status = 401, description = "Bad or missing admin credential", body = ApiError),
        (status = 500, description = "Server error", body = ApiError)
    ),
    tags = ["feedback"],
    operation_id = "listFeedbacks",
    security(("admin_bearer" = []))
)]
#[get("/feedbacks")]
pub async fn list_feedbacks(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Feedback>>> {
    require_admin(&req, &state.admin)?;
    let records = state
        .feedback
        .list_newest_first()
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(records))
}

/// Delete one feedback record by identifier.
#[utoipa::path(
    delete,
    path = "/api/feedbacks/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record removed", body = MessageResponse),
        (status = 401, description = "Bad or missing admin credential", body = ApiError),
        (status = 404, description = "No record with that identifier", body = ApiError),
        (status = 500, description = "Server error", body = ApiError)
    ),
    tags = ["feedback"],
    operation_id = "deleteFeedback",
    security(("admin_bearer" = []))
)]
#[delete("/feedbacks/{id}")]
pub async fn delete_feedback(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    require_admin(&req, &state.admin)?;
    let raw = path.into_inner();

    // A malformed identifier cannot name a stored record, so it gets the
    // same answer as an unknown one.
    let Ok(id) = FeedbackId::new(&raw) else {
        return Err(unknown_record(&raw));
    };

    let removed = state
        .feedback
        .delete_by_id(&id)
        .await
        .map_err(map_store_error)?;
    if !removed {
        return Err(unknown_record(&raw));
    }
    info!(%id, "feedback deleted");

    Ok(web::Json(MessageResponse::new("Feedback deleted")))
}
