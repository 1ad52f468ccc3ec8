use crate::api::ErrorResponse;
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
use recetas_core::ResolvedRecipe;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub language: String,
    pub category: String,
    pub recipes: Vec<ResolvedRecipe>,
}

#[utoipa::path(
    get,
    path = "/category/{name}",
    tag = "categories",
    params(
        ("name" = String, Path, description = "Exact category label in the request language")
    ),
    responses(
        (status = 200, description = "Recipes whose resolved category matches", body = CategoryResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn browse_category(
    State(state): State<AppState>,
    language: RequestLanguage,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

    let recipes = match store::search(&mut conn, "", Some(name.as_str()), language.code()) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to browse category {}: {}", name, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response();
        }
    };

    let response = CategoryResponse {
        language: language.code().to_string(),
        category: name,
        recipes,
    };

    (StatusCode::OK, Json(response)).into_response()
}
