//! Repository for the `contacts` table.

use sqlx::PgPool;

use crate::models::contact::{Contact, CreateContact};

const COLUMNS: &str = "id, full_name, email, mobile, city, created_at, updated_at";

/// Provides insert and list operations for contact form submissions.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a submission, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (full_name, email, mobile, city)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.city)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Contact>(&query).fetch_all(pool).await
    }
}
