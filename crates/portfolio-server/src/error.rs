//! HTTP Error Mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portfolio_core::PortfolioError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: &'static str,
}

/// Error surfaced by the lookup endpoints
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] PortfolioError);

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match &self.0 {
            PortfolioError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Project not found".into(),
            ),
            PortfolioError::DataUnavailable { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_UNAVAILABLE",
                self.0.to_string(),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                other.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, detail) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, "{}", self.0);
        }
        (status, Json(ErrorResponse { detail, code })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(PortfolioError::NotFound(4)).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unavailable =
            ApiError::from(PortfolioError::data_unavailable("portfolio.json", "missing")).into_response();
        assert_eq!(unavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
