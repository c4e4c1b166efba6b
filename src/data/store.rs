//! Read-through cache over the static JSON data files.
//!
//! Loaded files stay cached for the process lifetime; the files only
//! change on deploy, which restarts the server.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use dashmap::DashMap;

use crate::config::DataConfig;
use crate::data::model::{AvailableLanguages, Feature, Modpack, Translations};

/// Fallback when the translations directory cannot be scanned.
const FALLBACK_LANGUAGES: [&str; 2] = ["es", "en"];
const DEFAULT_LANGUAGE: &str = "es";

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("modpack with ID '{0}' does not exist")]
    ModpackNotFound(String),

    #[error("language '{0}' is not supported")]
    LanguageNotSupported(String),

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads and caches modpack and translation data.
pub struct DataStore {
    data_dir: PathBuf,
    modpacks: RwLock<Option<Arc<Vec<Modpack>>>>,
    translations: DashMap<String, Arc<Translations>>,
}

impl DataStore {
    pub fn new(config: &DataConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.dir),
            modpacks: RwLock::new(None),
            translations: DashMap::new(),
        }
    }

    /// All modpacks, loaded from `modpacks.json` on first access.
    pub fn modpacks(&self) -> Result<Arc<Vec<Modpack>>, DataError> {
        if let Some(cached) = self.modpacks.read().expect("modpacks lock poisoned").clone() {
            return Ok(cached);
        }

        let path = self.data_dir.join("modpacks.json");
        let modpacks: Arc<Vec<Modpack>> = Arc::new(read_json(&path)?);

        let mut slot = self.modpacks.write().expect("modpacks lock poisoned");
        // Another request may have loaded the file concurrently; either
        // copy is equivalent.
        if slot.is_none() {
            *slot = Some(modpacks.clone());
        }
        tracing::debug!(count = modpacks.len(), "Loaded modpacks from disk");
        Ok(modpacks)
    }

    /// One modpack by id.
    pub fn modpack_by_id(&self, id: &str) -> Result<Modpack, DataError> {
        self.modpacks()?
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| DataError::ModpackNotFound(id.to_string()))
    }

    /// Translation bundle for one language, loaded on first access.
    ///
    /// A missing file maps to `LanguageNotSupported`, not an I/O error:
    /// the language set is defined by which files exist.
    pub fn translations(&self, lang: &str) -> Result<Arc<Translations>, DataError> {
        if !is_valid_language_code(lang) {
            return Err(DataError::LanguageNotSupported(lang.to_string()));
        }

        if let Some(cached) = self.translations.get(lang) {
            return Ok(cached.clone());
        }

        let path = self.data_dir.join("translations").join(format!("{lang}.json"));
        if !path.exists() {
            return Err(DataError::LanguageNotSupported(lang.to_string()));
        }

        let translations: Arc<Translations> = Arc::new(read_json(&path)?);
        self.translations
            .insert(lang.to_string(), translations.clone());
        tracing::debug!(lang, "Loaded translations from disk");
        Ok(translations)
    }

    /// Scan the translations directory for available languages.
    pub fn available_languages(&self) -> AvailableLanguages {
        let dir = self.data_dir.join("translations");
        let mut languages: Vec<String> = match fs::read_dir(&dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter_map(|e| {
                    let path = e.path();
                    if path.extension().is_some_and(|ext| ext == "json") {
                        path.file_stem().map(|s| s.to_string_lossy().into_owned())
                    } else {
                        None
                    }
                })
                .collect(),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to scan translations directory");
                FALLBACK_LANGUAGES.iter().map(|s| s.to_string()).collect()
            }
        };
        languages.sort();

        AvailableLanguages {
            available_languages: languages,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Features of one modpack in one language. Missing entries are an
    /// empty list, not an error.
    pub fn features(&self, modpack_id: &str, lang: &str) -> Result<Vec<Feature>, DataError> {
        let translations = self.translations(lang)?;
        Ok(translations
            .features
            .get(modpack_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Drop all cached data. The next access reloads from disk.
    pub fn clear_cache(&self) {
        *self.modpacks.write().expect("modpacks lock poisoned") = None;
        self.translations.clear();
    }
}

/// Language codes are file stems; restrict them so a crafted path can
/// never escape the translations directory.
fn is_valid_language_code(lang: &str) -> bool {
    !lang.is_empty()
        && lang.len() <= 16
        && lang
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_data_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lk-api-store-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(dir.join("translations")).unwrap();
        dir
    }

    fn write_file(path: &Path, content: &str) {
        let mut file = fs::File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn store_with_fixtures() -> (DataStore, PathBuf) {
        let dir = temp_data_dir();
        write_file(
            &dir.join("modpacks.json"),
            r##"[{
                "id": "aether",
                "name": "Aether Reborn",
                "version": "1.2.0",
                "minecraftVersion": "1.20.1",
                "modloader": "forge",
                "modloaderVersion": "47.2.0",
                "gamemode": "survival",
                "logo": "https://cdn.example/logo.png",
                "backgroundImage": "https://cdn.example/bg.png",
                "primaryColor": "#8844ff"
            }]"##,
        );
        write_file(
            &dir.join("translations/en.json"),
            r#"{
                "modpacks": {"aether": {"name": "Aether", "description": "Long", "shortDescription": "Short"}},
                "features": {"aether": [{"title": "Dungeons"}]},
                "ui": {"status": {"active": "Active"}, "modloader": {}, "gamemode": {}}
            }"#,
        );
        let store = DataStore::new(&DataConfig {
            dir: dir.to_string_lossy().into_owned(),
        });
        (store, dir)
    }

    #[test]
    fn test_modpacks_read_through_cache() {
        let (store, dir) = store_with_fixtures();

        let first = store.modpacks().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "aether");

        // Remove the file; the cached copy must still be served.
        fs::remove_file(dir.join("modpacks.json")).unwrap();
        let second = store.modpacks().unwrap();
        assert_eq!(second[0].name, "Aether Reborn");

        store.clear_cache();
        assert!(store.modpacks().is_err());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_modpack_by_id() {
        let (store, dir) = store_with_fixtures();
        assert!(store.modpack_by_id("aether").is_ok());
        assert!(matches!(
            store.modpack_by_id("missing"),
            Err(DataError::ModpackNotFound(_))
        ));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_language_is_not_supported() {
        let (store, dir) = store_with_fixtures();
        assert!(store.translations("en").is_ok());
        assert!(matches!(
            store.translations("fr"),
            Err(DataError::LanguageNotSupported(_))
        ));
        assert!(matches!(
            store.translations("../secrets"),
            Err(DataError::LanguageNotSupported(_))
        ));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_available_languages_scans_directory() {
        let (store, dir) = store_with_fixtures();
        write_file(&dir.join("translations/es.json"), "{}");

        let langs = store.available_languages();
        assert_eq!(langs.available_languages, vec!["en", "es"]);
        assert_eq!(langs.default_language, "es");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_features_lookup() {
        let (store, dir) = store_with_fixtures();
        let features = store.features("aether", "en").unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].title, "Dungeons");

        assert!(store.features("unknown", "en").unwrap().is_empty());
        fs::remove_dir_all(dir).ok();
    }
}
