//! Client testimonial document and DTOs.

use landing_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub designation: String,
    /// Storage-relative path of the 300x300 photo, e.g. `uploads/client-....jpg`.
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a client. Built by the handler once the photo is stored.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub description: String,
    pub designation: String,
    pub image: String,
}
