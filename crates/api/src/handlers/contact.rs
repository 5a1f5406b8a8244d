//! Handlers for contact-form submissions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use marketing_core::validation::NewContact;
use marketing_db::models::contact::Contact;
use marketing_db::repositories::ContactRepo;

use crate::error::AppResult;
use crate::extract::Validated;
use crate::response::CreatedResponse;
use crate::state::AppState;

/// POST /api/contact
pub async fn submit(
    State(state): State<AppState>,
    Validated(input): Validated<NewContact>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let mut conn = state.pool.acquire().await?;
    let id = ContactRepo::create(&mut conn, &input).await?;
    tracing::info!(id, "Contact form submitted");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Contact form submitted successfully",
        }),
    ))
}

/// GET /api/contacts
// TODO: gate behind admin auth once the site has user accounts.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Contact>>> {
    let mut conn = state.pool.acquire().await?;
    let contacts = ContactRepo::list(&mut conn).await?;
    Ok(Json(contacts))
}
