//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use marketing_core::error::CoreError;
use marketing_core::types::DbId;
use marketing_core::validation::NewProject;
use marketing_db::models::project::Project;
use marketing_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::Validated;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Ids that do not parse can never match a row, so they are reported as
/// not found rather than as a bad request.
fn project_id(raw: &str) -> AppResult<DbId> {
    raw.parse().map_err(|_| not_found(raw))
}

fn not_found(id: impl ToString) -> AppError {
    AppError::Core(CoreError::not_found("Project", id))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let mut conn = state.pool.acquire().await?;
    let projects = ProjectRepo::list(&mut conn).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Project>> {
    let id = project_id(&raw_id)?;
    let mut conn = state.pool.acquire().await?;
    let project = ProjectRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    Validated(input): Validated<NewProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let mut conn = state.pool.acquire().await?;
    let project = ProjectRepo::create(&mut conn, &input).await?;
    tracing::info!(id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Validated(input): Validated<NewProject>,
) -> AppResult<Json<Project>> {
    let id = project_id(&raw_id)?;
    let mut conn = state.pool.acquire().await?;
    let project = ProjectRepo::update(&mut conn, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = project_id(&raw_id)?;
    let mut conn = state.pool.acquire().await?;
    if !ProjectRepo::delete(&mut conn, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Project deleted");
    Ok(Json(MessageResponse {
        message: "Project deleted successfully",
    }))
}
