use anyhow::Result;
use diesel::SqliteConnection;
use recetas_core::{estimate, NutritionTable};
use recetas_server::store;

/// Estimate calories for every recipe, storing them unless `dry_run`.
pub fn estimate_all(conn: &mut SqliteConnection, dry_run: bool) -> Result<usize> {
    let table = NutritionTable::builtin();
    let recipes = store::list_base_recipes(conn)?;

    for recipe in &recipes {
        let estimate = estimate(&recipe.ingredients, table);
        println!(
            "{:>5}  {:<40} {:>6} kcal  {:>5.0}% matched{}",
            recipe.id,
            recipe.title,
            estimate.total_calories,
            estimate.match_rate() * 100.0,
            estimate
                .per_serving(recipe.servings)
                .map(|kcal| format!("  ({kcal} kcal/serving)"))
                .unwrap_or_default()
        );

        if !dry_run {
            store::set_estimated_calories(conn, recipe.id, Some(estimate.total_calories))?;
        }
    }

    if dry_run {
        tracing::info!(count = recipes.len(), "dry run, nothing saved");
    } else {
        tracing::info!(count = recipes.len(), "saved calorie estimates");
    }

    Ok(recipes.len())
}
