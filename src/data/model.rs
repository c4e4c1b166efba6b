//! Serde models for modpack metadata and translations.
//!
//! Wire names are camelCase to match the JSON files the launcher
//! already consumes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Full modpack record as stored in `modpacks.json`, enriched with
/// translated descriptions and features before serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modpack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
    pub minecraft_version: String,
    pub modloader: String,
    pub modloader_version: String,
    pub gamemode: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_coming_soon: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub logo: String,
    pub background_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_modpack_zip: Option<String>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_embed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiktok_embed: Option<String>,
    #[serde(default)]
    pub feature_icons: Vec<String>,
    pub primary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaderboard_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaborator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lightweight modpack view for the main listing endpoint. The short
/// description comes from the requested language's translations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModpackSummary {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub version: String,
    pub minecraft_version: String,
    pub modloader: String,
    pub modloader_version: String,
    pub gamemode: String,
    pub logo: String,
    pub background_image: String,
    pub primary_color: String,
    pub is_new: bool,
    pub is_active: bool,
    pub is_coming_soon: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_modpack_zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl ModpackSummary {
    pub fn from_modpack(modpack: &Modpack, short_description: String) -> Self {
        Self {
            id: modpack.id.clone(),
            name: modpack.name.clone(),
            short_description,
            version: modpack.version.clone(),
            minecraft_version: modpack.minecraft_version.clone(),
            modloader: modpack.modloader.clone(),
            modloader_version: modpack.modloader_version.clone(),
            gamemode: modpack.gamemode.clone(),
            logo: modpack.logo.clone(),
            background_image: modpack.background_image.clone(),
            primary_color: modpack.primary_color.clone(),
            is_new: modpack.is_new,
            is_active: modpack.is_active,
            is_coming_soon: modpack.is_coming_soon,
            url_modpack_zip: modpack.url_modpack_zip.clone(),
            ip: modpack.ip.clone(),
        }
    }
}

/// Minimal modpack info for dropdowns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModpackListEntry {
    pub id: String,
    pub name: String,
    pub version: String,
    pub minecraft_version: String,
    pub modloader: String,
    pub modloader_version: String,
}

impl From<&Modpack> for ModpackListEntry {
    fn from(modpack: &Modpack) -> Self {
        Self {
            id: modpack.id.clone(),
            name: modpack.name.clone(),
            version: modpack.version.clone(),
            minecraft_version: modpack.minecraft_version.clone(),
            modloader: modpack.modloader.clone(),
            modloader_version: modpack.modloader_version.clone(),
        }
    }
}

/// Per-modpack translated strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModpackTranslation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
}

/// UI label translations needed for modpack display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiTranslations {
    #[serde(default)]
    pub status: HashMap<String, String>,
    #[serde(default)]
    pub modloader: HashMap<String, String>,
    #[serde(default)]
    pub gamemode: HashMap<String, String>,
}

/// Full translation bundle for one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Translations {
    #[serde(default)]
    pub modpacks: HashMap<String, ModpackTranslation>,
    #[serde(default)]
    pub features: HashMap<String, Vec<Feature>>,
    #[serde(default)]
    pub ui: UiTranslations,
}

/// Languages the API can serve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableLanguages {
    pub available_languages: Vec<String>,
    pub default_language: String,
}

/// Features of one modpack in one language.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModpackFeatures {
    pub modpack_id: String,
    pub language: String,
    pub features: Vec<Feature>,
}
