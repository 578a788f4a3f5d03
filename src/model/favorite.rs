//! Favorite wire types.

use serde::{Deserialize, Serialize};

/// Name used when sanitization leaves nothing behind.
pub const FALLBACK_FAVORITE_NAME: &str = "ERROR";

/// Strip a user-entered favorite name down to ASCII letters, `_`, `-` and
/// whitespace.
///
/// Falls back to [`FALLBACK_FAVORITE_NAME`] when nothing survives.
pub fn sanitize_favorite_name(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        FALLBACK_FAVORITE_NAME.to_string()
    } else {
        cleaned
    }
}

/// Body of `POST /favoritos`.
///
/// `data` and `busquedas` are JSON-encoded arrays carried as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFavoriteRequest {
    /// Favorite name.
    pub nombre: String,
    /// JSON array of captured values.
    pub data: String,
    /// JSON array of the queries active during capture.
    pub busquedas: String,
}

impl SaveFavoriteRequest {
    /// Build the request body from captured values and queries.
    pub fn new(nombre: String, values: &[String], queries: &[String]) -> Self {
        Self {
            nombre,
            data: encode_string_array(values),
            busquedas: encode_string_array(queries),
        }
    }
}

fn encode_string_array(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// One stored favorite, as listed by `GET /favoritos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Row id, informational only.
    #[serde(default)]
    pub id: Option<u64>,
    /// Favorite name; also the delete key and the export file stem.
    pub nombre: String,
    /// JSON array of captured values, possibly null.
    #[serde(default)]
    pub data: Option<String>,
    /// Queries that produced the data. Shape varies between backend versions,
    /// so it is kept as raw JSON.
    #[serde(default)]
    pub busquedas: serde_json::Value,
    /// Display date.
    #[serde(default)]
    pub fecha: Option<String>,
}

/// Body of `GET /favoritos`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FavoritesResponse {
    /// Stored favorites, newest first.
    #[serde(default)]
    pub favoritos: Vec<Favorite>,
}
