//! Modpack endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::data::model::ModpackTranslation;
use crate::data::{Modpack, ModpackFeatures, ModpackListEntry, ModpackSummary, UiTranslations};
use crate::http::error::ApiError;
use crate::http::server::AppState;

fn default_lang() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LangQuery {
    #[serde(default = "default_lang")]
    pub lang: String,
}

#[derive(Debug, Serialize)]
pub struct ModpacksResponse {
    pub count: usize,
    pub modpacks: Vec<ModpackSummary>,
    pub ui: UiTranslations,
}

#[derive(Debug, Serialize)]
pub struct ModpacksListResponse {
    pub count: usize,
    pub modpacks: Vec<ModpackListEntry>,
}

/// `GET /v1/modpacks?lang=` — lightweight modpacks with translations.
pub async fn list_modpacks(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<ModpacksResponse>, ApiError> {
    let modpacks = state.store.modpacks()?;
    let translations = state.store.translations(&query.lang)?;

    let summaries: Vec<ModpackSummary> = modpacks
        .iter()
        .map(|modpack| {
            let short_description = translations
                .modpacks
                .get(&modpack.id)
                .map(|t| t.short_description.clone())
                .unwrap_or_default();
            ModpackSummary::from_modpack(modpack, short_description)
        })
        .collect();

    Ok(Json(ModpacksResponse {
        count: summaries.len(),
        modpacks: summaries,
        ui: translations.ui.clone(),
    }))
}

/// `GET /v1/modpacks/list` — minimal info for dropdowns.
pub async fn list_basic(
    State(state): State<AppState>,
) -> Result<Json<ModpacksListResponse>, ApiError> {
    let modpacks = state.store.modpacks()?;
    let entries: Vec<ModpackListEntry> = modpacks.iter().map(ModpackListEntry::from).collect();

    Ok(Json(ModpacksListResponse {
        count: entries.len(),
        modpacks: entries,
    }))
}

/// `GET /v1/modpacks/{id}?lang=` — full modpack with translated
/// descriptions and features injected.
pub async fn get_modpack(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Modpack>, ApiError> {
    let mut modpack = state.store.modpack_by_id(&id)?;
    let translations = state.store.translations(&query.lang)?;

    let translation = translations
        .modpacks
        .get(&modpack.id)
        .cloned()
        .unwrap_or_else(ModpackTranslation::default);
    modpack.description = translation.description;
    modpack.short_description = translation.short_description;
    modpack.features = translations
        .features
        .get(&modpack.id)
        .cloned()
        .unwrap_or_default();

    Ok(Json(modpack))
}

/// `GET /v1/modpacks/{id}/features/{lang}`
pub async fn get_modpack_features(
    State(state): State<AppState>,
    Path((id, lang)): Path<(String, String)>,
) -> Result<Json<ModpackFeatures>, ApiError> {
    // 404 for unknown packs even though features alone would be empty
    state.store.modpack_by_id(&id)?;
    let features = state.store.features(&id, &lang)?;

    Ok(Json(ModpackFeatures {
        modpack_id: id,
        language: lang,
        features,
    }))
}
