//! Build metadata API endpoints.
//!
//! Two exposure variants serve the same two operations: the
//! operation-style endpoints under the management prefix and the
//! REST-style endpoints at the server root. Both are kept for
//! compatibility and share one implementation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use gitinfo_types::{BuildMetadata, ErrorResponse, GitProperties, PropertiesBag};

use crate::properties;
use crate::state::AppState;

/// Build metadata assembled from the five configured values.
///
/// Values that were never configured are reported as `null`; the values
/// themselves are returned verbatim, with no transformation. This
/// endpoint has no error path.
#[utoipa::path(
    get,
    path = "/actuator/custom-info/git/detail",
    tag = "git",
    responses(
        (status = 200, description = "Configured build metadata", body = BuildMetadata)
    )
)]
pub async fn build_metadata(State(state): State<AppState>) -> Json<BuildMetadata> {
    let git = state.git();
    Json(BuildMetadata {
        branch: git.branch.clone(),
        commit_id: git.commit.id.clone(),
        commit_time: git.commit.time.clone(),
        tags: git.tags.clone(),
        message: git.commit.message.short.clone(),
    })
}

/// Git properties summary loaded at startup.
///
/// Returns `null` when no properties resource was available; absence is
/// a normal outcome, not an error.
#[utoipa::path(
    get,
    path = "/actuator/git-info",
    tag = "git",
    responses(
        (status = 200, description = "Git properties summary, or null when absent", body = GitProperties)
    )
)]
pub async fn git_info(State(state): State<AppState>) -> Json<Option<GitProperties>> {
    Json(basic(&state))
}

/// Full raw contents of the properties resource, gated on a selector.
///
/// Returns `null` when the selector is `false` or no properties resource
/// was available at startup.
#[utoipa::path(
    get,
    path = "/actuator/git-info/{showDetail}",
    tag = "git",
    params(
        ("showDetail" = bool, Path, description = "Return the full raw key/value contents")
    ),
    responses(
        (status = 200, description = "Raw properties, or null", body = PropertiesBag),
        (status = 500, description = "The properties resource failed to load", body = ErrorResponse)
    )
)]
pub async fn git_info_detail(
    State(state): State<AppState>,
    Path(show_detail): Path<bool>,
) -> Result<Json<Option<PropertiesBag>>, (StatusCode, Json<ErrorResponse>)> {
    detail(&state, show_detail).map(Json)
}

/// REST-style variant of the git properties summary.
#[utoipa::path(
    get,
    path = "/git",
    tag = "git",
    responses(
        (status = 200, description = "Git properties summary, or null when absent", body = GitProperties)
    )
)]
pub async fn git(State(state): State<AppState>) -> Json<Option<GitProperties>> {
    Json(basic(&state))
}

/// REST-style variant of the raw properties detail.
#[utoipa::path(
    get,
    path = "/git/detail",
    tag = "git",
    responses(
        (status = 200, description = "Raw properties, or null when absent", body = PropertiesBag),
        (status = 500, description = "The properties resource failed to load", body = ErrorResponse)
    )
)]
pub async fn git_detail(
    State(state): State<AppState>,
) -> Result<Json<Option<PropertiesBag>>, (StatusCode, Json<ErrorResponse>)> {
    detail(&state, true).map(Json)
}

fn basic(state: &AppState) -> Option<GitProperties> {
    state.git_properties().cloned()
}

/// Re-reads the resource on every request. A resource that was present at
/// startup but can no longer be read fails the request; no partial or
/// empty result is returned on that path.
fn detail(
    state: &AppState,
    show_detail: bool,
) -> Result<Option<PropertiesBag>, (StatusCode, Json<ErrorResponse>)> {
    if !show_detail || state.git_properties().is_none() {
        return Ok(None);
    }

    match properties::load(state.properties_path()) {
        Ok(bag) => Ok(Some(bag)),
        Err(err) => {
            error!("Failed to load properties resource: {err}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details(
                    "Failed to load properties resource",
                    err.to_string(),
                )),
            ))
        }
    }
}
