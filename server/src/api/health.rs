use crate::api::ErrorResponse;
use crate::store;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(OpenApi)]
#[openapi(paths(health), components(schemas(HealthResponse)))]
pub struct ApiDoc;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub recipes_count: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 500, description = "Database unavailable", body = ErrorResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let count = state
        .pool
        .get()
        .map_err(store::StoreError::from)
        .and_then(|mut conn| store::count_recipes(&mut conn));

    match count {
        Ok(recipes_count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                recipes_count,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
