pub mod list;
pub mod set;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for language switching and discovery
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/set_language/{lang}", get(set::set_language))
        .route("/languages", get(list::list_languages))
}

#[derive(OpenApi)]
#[openapi(
    paths(set::set_language, list::list_languages),
    components(schemas(list::LanguagesResponse))
)]
pub struct ApiDoc;
