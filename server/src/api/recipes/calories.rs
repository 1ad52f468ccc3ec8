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
use recetas_core::{estimate, CalorieEstimate, NutritionTable};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CaloriesResponse {
    pub recipe_id: i32,
    /// Title in the request language
    pub title: String,
    pub servings: Option<i32>,
    pub per_serving: Option<i32>,
    /// Estimate saved by the last `calories` maintenance run, if any
    pub stored_calories: Option<i32>,
    pub estimate: CalorieEstimate,
}

#[utoipa::path(
    get,
    path = "/recipe/{id}/calories",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Calorie estimate from the base ingredients", body = CaloriesResponse),
        (status = 302, description = "Unknown recipe, redirects to the index"),
        (status = 404, description = "Malformed recipe id", body = ErrorResponse)
    )
)]
pub async fn get_calories(
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

    // The nutrition table is keyed by Spanish names, so estimate from the base text.
    let base = match store::get_recipe(&mut conn, id) {
        Ok(Some(r)) => r,
        Ok(None) => return found("/"),
        Err(e) => {
            tracing::error!("Failed to fetch recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let title = match store::resolve_one(&mut conn, id, language.code()) {
        Ok(Some(resolved)) => resolved.title,
        Ok(None) => base.title.clone(),
        Err(e) => {
            tracing::error!("Failed to resolve recipe {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let estimate = estimate(&base.ingredients, NutritionTable::builtin());

    let response = CaloriesResponse {
        recipe_id: id,
        title,
        servings: base.servings,
        per_serving: estimate.per_serving(base.servings),
        stored_calories: base.estimated_calories,
        estimate,
    };

    (StatusCode::OK, Json(response)).into_response()
}
