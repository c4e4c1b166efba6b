//! Static data subsystem.
//!
//! # Data Flow
//! ```text
//! data/modpacks.json, data/translations/{lang}.json
//!     → store.rs (read-through cache keyed by file)
//!     → model.rs (typed serde models, camelCase wire names)
//!     → api handlers pick the fields each endpoint exposes
//! ```

pub mod model;
pub mod store;

pub use model::{
    AvailableLanguages, Collaborator, Feature, Modpack, ModpackFeatures, ModpackListEntry,
    ModpackSummary, Translations, UiTranslations,
};
pub use store::{DataError, DataStore};
