pub mod calories;
pub mod get;
pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the recipe index and detail pages
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes))
        .route("/recipe/{id}", get(get::get_recipe))
        .route("/recipe/{id}/calories", get(calories::get_calories))
}

/// A path segment that is a well-formed recipe id.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PathId {
    Id(i32),
    /// All digits, but too large for any stored recipe.
    OutOfRange,
}

/// Parse a recipe id from the path. Only unsigned decimal digits are
/// accepted; anything else is treated as an unknown route.
pub(crate) fn parse_id(raw: &str) -> Option<PathId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(match raw.parse::<i32>() {
        Ok(id) => PathId::Id(id),
        Err(_) => PathId::OutOfRange,
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_recipes, get::get_recipe, calories::get_calories),
    components(schemas(
        list::ListRecipesResponse,
        get::RecipeDetailResponse,
        calories::CaloriesResponse,
        recetas_core::CalorieEstimate,
        recetas_core::IngredientCalories,
    ))
)]
pub struct ApiDoc;
