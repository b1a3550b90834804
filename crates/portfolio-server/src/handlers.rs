//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use tracing::Instrument;

use portfolio_core::{ChatMessage, PortfolioData, PortfolioError, Project};

use crate::error::ApiError;
use crate::startup::BODY_LIMIT_BYTES;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub chatbot_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Landing page, served verbatim
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let path = state.paths.index_html();
    let html = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PortfolioError::data_unavailable(&path, e))?;

    Ok(Html(html))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        chatbot_configured: state.chat.is_configured(),
    })
}

/// Full portfolio document
pub async fn get_portfolio(State(state): State<AppState>) -> Result<Json<PortfolioData>, ApiError> {
    Ok(Json(state.store.load_portfolio().await?))
}

/// All projects, in file order
pub async fn get_projects(State(state): State<AppState>) -> Result<Json<ProjectsResponse>, ApiError> {
    let projects = state.store.projects().await?;
    Ok(Json(ProjectsResponse { projects }))
}

/// Single project by id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.store.project(id).await?))
}

/// Chatbot endpoint; always answers 200 with some text
///
/// A well-formed body over the size limit still gets the fixed fallback text.
/// Other body rejections (bad JSON, wrong content type) keep their 4xx.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatMessage>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::BytesRejection(rejection)) => {
            let span = tracing::info_span!("chat", request_id = %uuid::Uuid::new_v4());
            let _guard = span.enter();
            tracing::debug!("Chat body rejected: {}", rejection.body_text());
            return Json(state.chat.reply_body_too_large(BODY_LIMIT_BYTES)).into_response();
        }
        Err(rejection) => return rejection.into_response(),
    };

    let span = tracing::info_span!(
        "chat",
        request_id = %uuid::Uuid::new_v4(),
        message_chars = payload.message.chars().count(),
    );

    let response = state.chat.reply(&payload.message).instrument(span).await;
    Json(response).into_response()
}
