//! Portfolio project document and DTOs.

use landing_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// Storage-relative path of the 450x350 photo.
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub image: String,
}
