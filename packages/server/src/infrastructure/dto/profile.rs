//! Profile record as exported by the profile store.

use serde::{Deserialize, Serialize};

fn default_preferred_language() -> String {
    "English".to_string()
}

/// One user profile in the seed file.
///
/// Field names follow the profile store's camelCase JSON; `_id` is accepted
/// as an alias for `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_preferred_language")]
    pub preferred_language: String,
    #[serde(default)]
    pub learning_languages: Vec<String>,
    /// "Beginner" | "Intermediate" | "Advanced" | "Fluent"
    #[serde(default)]
    pub proficiency_level: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}
