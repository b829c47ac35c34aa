//! Contact form submission document and DTOs.

use landing_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contacts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a contact form submission.
///
/// Absent fields deserialize as empty strings so that required-field checks
/// answer with a 400 instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateContact {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
}
