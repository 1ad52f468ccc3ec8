use anyhow::{Context, Result};
use diesel::SqliteConnection;
use recetas_core::{ImportError, TranslationFields};
use recetas_server::store::{self, StoreError};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TranslationSummary {
    pub upserted: usize,
    pub skipped: usize,
}

/// Parse a translation file: a JSON object mapping recipe ids to fields.
///
/// ```json
/// { "1": { "title": "Cheese Cake", "category": "Desserts" } }
/// ```
pub fn parse_translations(json: &str) -> Result<BTreeMap<i32, TranslationFields>, ImportError> {
    let raw: BTreeMap<String, TranslationFields> =
        serde_json::from_str(json).map_err(|e| ImportError::InvalidTranslations(e.to_string()))?;

    raw.into_iter()
        .map(|(key, fields)| {
            key.trim()
                .parse::<i32>()
                .map(|id| (id, fields))
                .map_err(|_| ImportError::InvalidTranslations(format!("'{key}' is not a recipe id")))
        })
        .collect()
}

/// Upsert every overlay in `path` for `language`. Unknown recipe ids are skipped.
pub fn import_file(
    conn: &mut SqliteConnection,
    language: &str,
    path: &Path,
) -> Result<TranslationSummary> {
    let json = std::fs::read_to_string(path)
        .map_err(|source| ImportError::Read {
            path: path.display().to_string(),
            source,
        })
        .with_context(|| format!("failed to load translations from {}", path.display()))?;
    let overlays = parse_translations(&json)?;
    import_overlays(conn, language, &overlays)
}

pub fn import_overlays(
    conn: &mut SqliteConnection,
    language: &str,
    overlays: &BTreeMap<i32, TranslationFields>,
) -> Result<TranslationSummary> {
    let mut summary = TranslationSummary::default();

    for (&id, fields) in overlays {
        match store::upsert_translation(conn, id, language, fields) {
            Ok(_) => summary.upserted += 1,
            Err(StoreError::RecipeNotFound(id)) => {
                tracing::warn!(id, language, "no such recipe, skipping overlay");
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}
