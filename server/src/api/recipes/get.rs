use super::{parse_id, PathId};
use crate::api::{found, ErrorResponse};
use crate::get_conn;
use crate::language::RequestLanguage;
use crate::store;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use recetas_core::{markdown_to_html, ResolvedRecipe};
use serde::Serialize;
use utoipa::ToSchema;

/// A resolved recipe plus HTML renderings of its markdown fields.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: ResolvedRecipe,
    pub ingredients_html: String,
    pub instructions_html: String,
}

impl From<ResolvedRecipe> for RecipeDetailResponse {
    fn from(recipe: ResolvedRecipe) -> Self {
        RecipeDetailResponse {
            ingredients_html: markdown_to_html(&recipe.ingredients),
            instructions_html: markdown_to_html(&recipe.instructions),
            recipe,
        }
    }
}

#[utoipa::path(
    get,
    path = "/recipe/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID"),
        ("language" = Option<String>, Query, description = "Switch to this language and remember the choice")
    ),
    responses(
        (status = 200, description = "Recipe resolved for the request language", body = RecipeDetailResponse),
        (status = 302, description = "Unknown recipe, redirects to the index"),
        (status = 404, description = "Malformed recipe id", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    language: RequestLanguage,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_id(&id) {
        Some(PathId::Id(id)) => id,
        Some(PathId::OutOfRange) => return found("/"),
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Not found".to_string(),
                }),
            )
                .into_response()
        }
    };

    let mut conn = get_conn!(state.pool);

    match store::resolve_one(&mut conn, id, language.code()) {
        Ok(Some(recipe)) => {
            (StatusCode::OK, Json(RecipeDetailResponse::from(recipe))).into_response()
        }
        Ok(None) => found("/"),
        Err(e) => {
            tracing::error!("Failed to resolve recipe {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response()
        }
    }
}
