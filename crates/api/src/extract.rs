//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use marketing_core::error::CoreError;
use marketing_core::validation::{validate, FieldError, RuleSet};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Reported when a JSON body cannot be parsed or read.
pub const MALFORMED_BODY_MESSAGE: &str = "Request body is not valid JSON";

/// A JSON body checked against the rule set `T`.
///
/// Runs before the handler body, so a rejected request never reaches the
/// database. Missing bodies, bodies sent without a JSON content type and
/// empty JSON bodies all validate as `{}`, so each required field reports its
/// own error. Only a JSON body that fails to parse yields a single `body`
/// error.
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: RuleSet,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "Unreadable request body");
            malformed_body()
        })?;

        let body = if !json || bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                tracing::debug!(error = %e, "Malformed JSON body");
                malformed_body()
            })?
        };

        validate::<T>(&body)
            .map(Validated)
            .map_err(|errors| AppError::Core(CoreError::Validation(errors)))
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || essence
            .rsplit_once('+')
            .is_some_and(|(ty, suffix)| {
                suffix.eq_ignore_ascii_case("json")
                    && ty.get(..12).is_some_and(|t| t.eq_ignore_ascii_case("application/"))
            })
}

fn malformed_body() -> AppError {
    AppError::Core(CoreError::Validation(vec![FieldError::new(
        "body",
        MALFORMED_BODY_MESSAGE,
    )]))
}
