//! Handlers for the `/clients` resource.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use landing_core::error::CoreError;
use landing_db::models::client::{Client, CreateClient};
use landing_pipeline::ImageGeometry;

use crate::error::AppResult;
use crate::handlers::upload_form::{persist_with_image, UploadForm};
use crate::state::AppState;

pub const FIELDS_REQUIRED: &str = "Name, description, designation, and image are required";

/// POST /api/clients
///
/// Multipart form with `name`, `description`, `designation` and an `image`
/// file, stored as a 300x300 cover-fit photo.
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let upload = UploadForm::read(&state.uploads, multipart?)
        .await?
        .validate(&["name", "description", "designation"], FIELDS_REQUIRED)?;

    let name = upload.text("name");
    let description = upload.text("description");
    let designation = upload.text("designation");

    let stored = state
        .uploads
        .ingest(upload.into_image(), ImageGeometry::CLIENT)
        .await
        .map_err(CoreError::from)?;

    let store = state.store.clone();
    let client = persist_with_image(stored, |image| async move {
        let input = CreateClient {
            name,
            description,
            designation,
            image,
        };
        store.create_client(&input).await
    })
    .await?;

    tracing::info!(client_id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/clients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let clients = state.store.list_clients().await?;
    Ok(Json(clients))
}
