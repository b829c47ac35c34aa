//! Repository for the `clients` table.

use sqlx::PgPool;

use crate::models::client::{Client, CreateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, designation, image, created_at, updated_at";

/// Provides insert and list operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, description, designation, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.designation)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// List all clients, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }
}
