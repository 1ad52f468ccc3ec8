//! SQLite-backed recipe store.
//!
//! Reads go through the pure resolver in `recetas_core`; this module only
//! fetches rows. Every query runs inside a `db.query` span so per-request
//! query counts show up in telemetry.

mod recipes;
mod translations;

pub use recipes::{
    count_recipes, get_recipe, list_base_recipes, list_categories, resolve_many, resolve_one,
    search, set_estimated_calories, upsert_recipe, UpsertOutcome,
};
pub use translations::{get_translation, list_translations, upsert_translation};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("recipe {0} does not exist")]
    RecipeNotFound(i32),

    #[error("overlays cannot target the base language '{0}'")]
    BaseLanguageOverlay(String),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("migration failed: {0}")]
    Migration(String),
}
