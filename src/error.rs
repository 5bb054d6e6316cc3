use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;
use crate::formatter::html_escape;
use crate::grid::GridError;
use crate::templates::base_html;

/// Web-layer error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Grid(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Upstream(msg) => {
                tracing::error!("Unexpected content service response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The content service sent an unexpected response".to_string(),
                )
            }
            AppError::Api(ApiError::Unauthorized) => (
                StatusCode::UNAUTHORIZED,
                "Sign in to the content service first".to_string(),
            ),
            AppError::Api(ApiError::NotFound) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            AppError::Api(e) => {
                tracing::error!("Content service error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "The content service is unavailable".to_string(),
                )
            }
        };

        let body = format!(
            r#"<div class="error"><h1>{}</h1><p>{}</p><a href="/">Back to dashboard</a></div>"#,
            status.as_u16(),
            html_escape(&message)
        );
        (status, Html(base_html("Error", &body))).into_response()
    }
}
