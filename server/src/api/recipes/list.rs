use crate::api::ErrorResponse;
use crate::get_conn;
use crate::language::RequestLanguage;
use crate::store;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use recetas_core::ResolvedRecipe;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Case-insensitive text matched against title, description and ingredients
    pub q: Option<String>,
    /// Exact category, compared with the category shown in the current language
    pub category: Option<String>,
    /// Switch to this language and remember the choice
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub language: String,
    pub query: String,
    pub selected_category: String,
    /// Base-language categories for browsing
    pub categories: Vec<String>,
    pub recipes: Vec<ResolvedRecipe>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes in the request language", body = ListRecipesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    language: RequestLanguage,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let query = params.q.unwrap_or_default();
    let category = params.category.unwrap_or_default();

    let recipes = if query.is_empty() && category.is_empty() {
        store::resolve_many(&mut conn, language.code())
    } else {
        store::search(&mut conn, &query, Some(category.as_str()), language.code())
    };

    let recipes = match recipes {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let categories = match store::list_categories(&mut conn) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch categories".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = ListRecipesResponse {
        language: language.code().to_string(),
        query,
        selected_category: category,
        categories,
        recipes,
    };

    (StatusCode::OK, Json(response)).into_response()
}
