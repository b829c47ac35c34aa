//! Handlers for the `/projects` resource.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use landing_core::error::CoreError;
use landing_db::models::project::{CreateProject, Project};
use landing_pipeline::ImageGeometry;

use crate::error::AppResult;
use crate::handlers::upload_form::{persist_with_image, UploadForm};
use crate::state::AppState;

pub const FIELDS_REQUIRED: &str = "Name, description, and image are required";

/// POST /api/projects
///
/// Multipart form with `name`, `description` and an `image` file, stored as
/// a 450x350 cover-fit photo.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let upload = UploadForm::read(&state.uploads, multipart?)
        .await?
        .validate(&["name", "description"], FIELDS_REQUIRED)?;

    let name = upload.text("name");
    let description = upload.text("description");

    let stored = state
        .uploads
        .ingest(upload.into_image(), ImageGeometry::PROJECT)
        .await
        .map_err(CoreError::from)?;

    let store = state.store.clone();
    let project = persist_with_image(stored, |image| async move {
        let input = CreateProject {
            name,
            description,
            image,
        };
        store.create_project(&input).await
    })
    .await?;

    tracing::info!(project_id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects().await?;
    Ok(Json(projects))
}
