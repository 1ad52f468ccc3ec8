use crate::api::ErrorResponse;
use crate::get_conn;
use crate::language::RequestLanguage;
use crate::store;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub language: String,
    /// Distinct base-language categories, sorted
    pub categories: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All recipe categories", body = CategoriesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    language: RequestLanguage,
) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool);

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

    let response = CategoriesResponse {
        language: language.code().to_string(),
        categories,
    };

    (StatusCode::OK, Json(response)).into_response()
}
