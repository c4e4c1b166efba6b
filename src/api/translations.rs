//! Translation endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::data::{AvailableLanguages, Translations};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// `GET /v1/translations` — languages the API can serve.
pub async fn available_languages(State(state): State<AppState>) -> Json<AvailableLanguages> {
    Json(state.store.available_languages())
}

/// `GET /v1/translations/{lang}` — full translation bundle.
pub async fn get_translations(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> Result<Json<Translations>, ApiError> {
    let translations = state.store.translations(&lang)?;
    Ok(Json(translations.as_ref().clone()))
}
