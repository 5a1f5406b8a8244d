//! Repository for the `projects` table.

use marketing_core::types::DbId;
use marketing_core::validation::NewProject;
use sqlx::{Connection, PgConnection};

use crate::models::project::Project;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, image_url, created_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List all projects, newest first. Ties on `created_at` fall back to `id`.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(conn).await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a project and read the stored row back in the same transaction.
    pub async fn create(conn: &mut PgConnection, input: &NewProject) -> Result<Project, sqlx::Error> {
        let mut tx = conn.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO projects (title, description, image_url)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_one(&mut *tx)
        .await?;

        let project = Self::find_by_id(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(project)
    }

    /// Replace every editable field of a project, then read it back.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &NewProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = conn.begin().await?;

        let result = sqlx::query(
            "UPDATE projects SET title = $2, description = $3, image_url = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let project = Self::find_by_id(&mut tx, id).await?;
        tx.commit().await?;
        Ok(project)
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
