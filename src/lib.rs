//! Second Brain library - re-exports for testing and external use.
//!
//! The two pure pieces, [`grid::distribute`] and
//! [`formatter::format_description`], carry the dashboard logic; the rest
//! is the web front end around the remote Content API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod draft;
pub mod error;
pub mod formatter;
pub mod grid;
pub mod handlers;
pub mod links;
pub mod models;
pub mod templates;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub api: api::ContentApi,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Self, api::ApiError> {
        let api = api::ContentApi::new(config.api_url.clone(), config.request_timeout)?;
        Ok(Self { config, api })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/content", post(handlers::create_content))
        .route("/content/autofill", post(handlers::autofill_content))
        .route("/content/{id}", get(handlers::content_detail))
        .route("/content/{id}/delete", post(handlers::delete_content))
        .route("/api/metadata", post(handlers::lookup_metadata))
        .route("/share", post(handlers::share_brain))
        .route("/share/{share_id}", get(handlers::shared_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use models::{ContentItem, ContentMetadata, ContentType, NewContent, SharedBrain, Tag};

pub use grid::{
    columns_for_width, distribute, filter_items, matches_search, Category, GridError, GridQuery,
};

pub use formatter::{format_description, html_escape};

pub use links::{embed_link, share_id_from_link, validate_link, LinkError};

pub use draft::{ContentDraft, DraftError, TagSet};

pub use api::{ApiError, ContentApi, Session};

pub use config::Config;

pub use error::AppError;
