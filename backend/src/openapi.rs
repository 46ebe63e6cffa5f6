//! OpenAPI documentation configuration.

use gitinfo_types::{BuildMetadata, ErrorResponse, GitProperties, PropertiesBag};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::git::build_metadata,
        crate::api::git::git_info,
        crate::api::git::git_info_detail,
        crate::api::git::git,
        crate::api::git::git_detail,
    ),
    components(
        schemas(
            BuildMetadata,
            GitProperties,
            PropertiesBag,
            ErrorResponse,
        )
    ),
    tags(
        (name = "git", description = "Build metadata endpoints")
    ),
    info(
        title = "Gitinfo Management API",
        version = "0.1.0",
        description = "Read-only HTTP endpoints exposing build provenance metadata of a running service",
        license(
            name = "MIT OR Apache-2.0"
        )
    )
)]
pub struct ApiDoc;
