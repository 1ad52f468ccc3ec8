pub mod browse;
pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for category browsing
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list::list_categories))
        .route("/category/{name}", get(browse::browse_category))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_categories, browse::browse_category),
    components(schemas(list::CategoriesResponse, browse::CategoryResponse))
)]
pub struct ApiDoc;
