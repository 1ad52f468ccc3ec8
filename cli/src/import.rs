use anyhow::{Context, Result};
use diesel::SqliteConnection;
use recetas_core::parse_recipe_file;
use recetas_server::store::{self, UpsertOutcome};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Markdown files directly inside `dir`, sorted by name.
fn recipe_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    Ok(files)
}

/// Import every markdown recipe in `dir`.
///
/// Files that can't be read or parsed are logged and counted, and the rest
/// of the directory is still imported.
pub fn import_dir(conn: &mut SqliteConnection, dir: &Path) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for path in recipe_files(dir)? {
        let parsed = match parse_recipe_file(&path) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                summary.failed += 1;
                continue;
            }
        };

        match store::upsert_recipe(conn, &parsed)? {
            UpsertOutcome::Created(id) => {
                tracing::info!(id, title = %parsed.title, category = %parsed.category, "created recipe");
                summary.created += 1;
            }
            UpsertOutcome::Updated(id) => {
                tracing::debug!(id, title = %parsed.title, "updated recipe");
                summary.updated += 1;
            }
        }
    }

    Ok(summary)
}
