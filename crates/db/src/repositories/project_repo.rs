//! Repository for the `projects` table.

use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, image, created_at, updated_at";

/// Provides insert and list operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, image)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }
}
