//! Gitinfo backend library.
//!
//! This module exposes the application builder for use in tests.

use axum::http::HeaderValue;
use axum::http::{header, Method};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod api;
pub mod config;
pub mod openapi;
pub mod properties;
pub mod state;

use config::DEFAULT_MANAGEMENT_PREFIX;
use state::AppState;

/// Create the Axum application router with the default management prefix.
///
/// This function is used both by the main server binary and by integration tests.
pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, DEFAULT_MANAGEMENT_PREFIX, Vec::new())
}

/// Create the Axum application router.
///
/// `management_prefix` must start with `/`. If `cors_allowed_origins` is
/// empty, any origin is allowed; otherwise, only the specified origins
/// are allowed.
pub fn create_app_with_config(
    state: AppState,
    management_prefix: &str,
    cors_allowed_origins: Vec<String>,
) -> Router {
    // Operation-style endpoints under the management prefix
    let management_router = Router::new()
        .route("/custom-info/git/detail", get(api::git::build_metadata))
        .route("/git-info", get(api::git::git_info))
        .route("/git-info/{showDetail}", get(api::git::git_info_detail));

    // REST-style variant of the same operations at the server root
    let rest_router = Router::new()
        .route("/git", get(api::git::git))
        .route("/git/detail", get(api::git::git_detail));

    // Swagger UI with the generated OpenAPI document
    let swagger_router = Router::new().merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
    );

    // Build main router
    Router::new()
        .route("/health", get(health))
        .merge(swagger_router)
        .nest(management_prefix, management_router)
        .merge(rest_router)
        .layer(TraceLayer::new_for_http())
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

            // If no origins specified, allow any origin
            // Otherwise, restrict to the specified origins
            if cors_allowed_origins.is_empty() {
                cors.allow_origin(Any)
            } else {
                let origins: Vec<HeaderValue> = cors_allowed_origins
                    .iter()
                    .filter_map(|o| o.parse::<HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins)
            }
        })
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}
