use crate::language::RequestLanguage;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use recetas_core::{LanguageSource, SupportedLanguage};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LanguagesResponse {
    /// Language selected for this request
    pub current: String,
    pub source: LanguageSource,
    pub default: String,
    pub supported: Vec<SupportedLanguage>,
}

#[utoipa::path(
    get,
    path = "/languages",
    tag = "language",
    responses(
        (status = 200, description = "Supported languages and the current selection", body = LanguagesResponse)
    )
)]
pub async fn list_languages(
    State(state): State<AppState>,
    language: RequestLanguage,
) -> impl IntoResponse {
    Json(LanguagesResponse {
        current: language.code().to_string(),
        source: language.0.source,
        default: state.languages.default_code().to_string(),
        supported: state.languages.supported().to_vec(),
    })
}
