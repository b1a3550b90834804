//! Router Assembly

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    chat_handler, get_portfolio, get_project, get_projects, health_check, index,
};
use crate::state::AppState;

/// Largest accepted request body
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.paths.static_dir.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages & health
        .route("/", get(index))
        .route("/health", get(health_check))

        // Portfolio API
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/projects", get(get_projects))
        .route("/api/projects/{id}", get(get_project))

        // Chatbot
        .route("/api/chat", post(chat_handler))

        // Static assets
        .nest_service("/static", ServeDir::new(&static_dir))
        .nest_service("/images", ServeDir::new(static_dir.join("images")))
        .nest_service("/css", ServeDir::new(static_dir.join("css")))
        .nest_service("/js", ServeDir::new(static_dir.join("js")))

        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
