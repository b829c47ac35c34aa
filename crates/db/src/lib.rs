//! Persistence for the landing backend.
//!
//! Handlers talk to a [`Store`]; [`PgStore`] backs it with PostgreSQL through
//! the zero-sized repositories in [`repositories`], and [`MemoryStore`] keeps
//! everything in process for tests and local runs without a database.

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryStore;
pub use store::{PgStore, Store};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
