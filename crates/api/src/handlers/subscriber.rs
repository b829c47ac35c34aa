//! Handlers for the `/subscribers` resource.
//!
//! Subscribing is idempotent: an email that is already on the list answers
//! 200 with the existing document instead of inserting a second one.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use landing_core::error::CoreError;
use landing_core::validation::non_blank;
use landing_db::models::subscriber::{CreateSubscriber, Subscriber};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const EMAIL_REQUIRED: &str = "Email is required";

/// POST /api/subscribers
pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubscriber>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Subscriber>)> {
    let Json(input) = payload?;
    let email = non_blank(Some(input.email.as_str()))
        .ok_or_else(|| CoreError::Validation(EMAIL_REQUIRED.into()))?
        .to_string();

    if let Some(existing) = state.store.find_subscriber_by_email(&email).await? {
        return Ok((StatusCode::OK, Json(existing)));
    }

    let input = CreateSubscriber { email };
    if let Some(created) = state.store.create_subscriber(&input).await? {
        tracing::info!(subscriber_id = created.id, "Subscriber added");
        return Ok((StatusCode::CREATED, Json(created)));
    }

    // Lost a race against a concurrent subscribe for the same email.
    let existing = state
        .store
        .find_subscriber_by_email(&input.email)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "subscriber {} rejected as duplicate but not found",
                input.email
            ))
        })?;
    Ok((StatusCode::OK, Json(existing)))
}

/// GET /api/subscribers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Subscriber>>> {
    let subscribers = state.store.list_subscribers().await?;
    Ok(Json(subscribers))
}
