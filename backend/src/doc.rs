//! OpenAPI documentation configuration.
//!
//! Generates the specification for the REST API: the feedback endpoints,
//! the health probes, and the bearer security scheme used by the admin
//! operations. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::Feedback;
use crate::inbound::http::feedback::{MessageResponse, SubmitFeedbackRequest};
use crate::inbound::http::ApiError;

/// Register the admin bearer scheme on the generated document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "admin_bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("The shared admin secret, sent verbatim."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the feedback REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Feedback backend API",
        description = "Public feedback submission and the admin listing behind a shared bearer secret."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::feedback::submit_feedback,
        crate::inbound::http::feedback::list_feedbacks,
        crate::inbound::http::feedback::delete_feedback,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Feedback, SubmitFeedbackRequest, MessageResponse, ApiError)),
    tags(
        (name = "feedback", description = "Feedback submission and administration"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
