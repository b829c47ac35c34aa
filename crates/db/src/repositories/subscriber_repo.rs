//! Repository for the `subscribers` table.

use sqlx::PgPool;

use crate::models::subscriber::{CreateSubscriber, Subscriber};

const COLUMNS: &str = "id, email, created_at, updated_at";

/// Provides lookup, insert and list operations for subscribers.
pub struct SubscriberRepo;

impl SubscriberRepo {
    /// Find a subscriber by exact email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers WHERE email = $1");
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert a subscriber.
    ///
    /// Returns `None` when `uq_subscribers_email` already holds the address,
    /// so a concurrent duplicate never surfaces as a constraint error.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscribers (email)
             VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_subscribers_email DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscriber>(&query)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// List all subscribers, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subscriber>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscribers ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Subscriber>(&query).fetch_all(pool).await
    }
}
