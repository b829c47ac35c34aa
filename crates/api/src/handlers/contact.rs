//! Handlers for the `/contact` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use landing_core::validation::{non_blank, require_fields};
use landing_db::models::contact::{Contact, CreateContact};

use crate::error::AppResult;
use crate::state::AppState;

pub const FIELDS_REQUIRED: &str = "All fields are required";

/// POST /api/contact
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateContact>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let Json(input) = payload?;
    require_fields(
        &[
            ("fullName", Some(input.full_name.as_str())),
            ("email", Some(input.email.as_str())),
            ("mobile", Some(input.mobile.as_str())),
            ("city", Some(input.city.as_str())),
        ],
        FIELDS_REQUIRED,
    )?;

    let input = CreateContact {
        full_name: trimmed(&input.full_name),
        email: trimmed(&input.email),
        mobile: trimmed(&input.mobile),
        city: trimmed(&input.city),
    };
    let contact = state.store.create_contact(&input).await?;

    tracing::info!(contact_id = contact.id, "Contact submitted");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/contact
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Contact>>> {
    let contacts = state.store.list_contacts().await?;
    Ok(Json(contacts))
}

fn trimmed(value: &str) -> String {
    non_blank(Some(value)).unwrap_or_default().to_string()
}
