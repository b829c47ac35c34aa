//! Newsletter subscriber document and DTOs.

use landing_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscribers` table. `email` is unique.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: DbId,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for subscribing an email address.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSubscriber {
    pub email: String,
}
