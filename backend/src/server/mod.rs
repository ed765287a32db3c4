//! Server bootstrap: wiring the pool, state, middleware, and routes.

pub mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::{api_scope, state::HttpState};
use crate::middleware::Trace;
use crate::outbound::persistence::{DbPool, DieselFeedbackRepository, PoolConfig};

/// Build the dependency graph and serve HTTP until shutdown.
///
/// # Errors
/// Fails when the connection pool cannot be built or the listen address
/// cannot be bound.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let pool = DbPool::new(PoolConfig::new(config.database_url()))
        .await
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(HttpState::new(
        Arc::new(DieselFeedbackRepository::new(pool)),
        config.admin_secret().clone(),
    ));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe sees the same flag.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        #[cfg_attr(not(debug_assertions), expect(unused_mut, reason = "Swagger UI is debug-only"))]
        let mut app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api_scope())
            .service(health::ready)
            .service(health::live);

        #[cfg(debug_assertions)]
        {
            app = app
                .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        app
    })
    .bind(config.bind_addr())?;

    health_state.mark_ready();
    server.run().await
}
