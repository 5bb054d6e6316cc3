//! HTTP route handlers for the web application.
//!
//! Every handler fetches fresh data from the Content API, runs it through the
//! grid and formatter, and renders HTML. Nothing is cached between requests.

use crate::api::Session;
use crate::draft::{ContentDraft, TagSet};
use crate::error::AppError;
use crate::grid::{columns_for_width, Category, GridQuery, DEFAULT_COLUMNS};
use crate::links::{share_id_from_link, validate_link};
use crate::models::{ContentMetadata, ContentType};
use crate::templates::{
    dashboard_url, render_content_page, render_dashboard, render_share_link, render_shared,
    DashboardView,
};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Largest column count a request may ask for.
pub const MAX_COLUMNS: usize = 8;

// ============================================================================
// Request Helpers
// ============================================================================

/// Forward the browser's `Cookie` header exactly as sent; the Content API
/// owns the session. Repeated headers are joined the way HTTP/2 splits them.
fn session_from(headers: &HeaderMap) -> Session {
    let header = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    Session::from_cookie_header(header)
}

#[derive(Debug, Default, Deserialize)]
pub struct GridParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub columns: Option<String>,
    pub width: Option<String>,
}

impl GridParams {
    /// Explicit `columns` wins over `width`; with neither the default applies.
    /// Zero columns is passed through and rejected by the grid itself.
    fn column_count(&self) -> Result<usize, AppError> {
        let columns = match (self.columns.as_deref(), self.width.as_deref()) {
            (Some(columns), _) if !columns.trim().is_empty() => columns
                .trim()
                .parse::<usize>()
                .map_err(|_| AppError::BadRequest(format!("Invalid column count: {}", columns)))?,
            (_, Some(width)) if !width.trim().is_empty() => {
                let width = width
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid width: {}", width)))?;
                columns_for_width(width)
            }
            _ => DEFAULT_COLUMNS,
        };

        if columns > MAX_COLUMNS {
            return Err(AppError::BadRequest(format!(
                "At most {} columns are supported",
                MAX_COLUMNS
            )));
        }
        Ok(columns)
    }

    pub fn grid_query(&self) -> Result<GridQuery, AppError> {
        Ok(GridQuery {
            category: self
                .category
                .as_deref()
                .map(Category::parse)
                .unwrap_or_default(),
            search: self.q.clone().unwrap_or_default(),
            columns: self.column_count()?,
        })
    }
}

/// Render the dashboard for `query` with the add-content form showing `draft`.
async fn render_with_draft(
    state: &AppState,
    session: &Session,
    query: &GridQuery,
    draft: &ContentDraft,
    error: Option<&str>,
) -> Result<String, AppError> {
    let items = state.api.list_content(session).await?;
    let columns = query.apply(&items)?;
    Ok(render_dashboard(&DashboardView {
        query,
        columns: &columns,
        draft: Some(draft),
        error,
    }))
}

// ============================================================================
// Dashboard Handler
// ============================================================================

pub async fn dashboard(
    Query(params): Query<GridParams>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let query = params.grid_query()?;
    let items = state.api.list_content(&session_from(&headers)).await?;
    let columns = query.apply(&items)?;

    Ok(Html(render_dashboard(&DashboardView {
        query: &query,
        columns: &columns,
        draft: None,
        error: None,
    })))
}

// ============================================================================
// Content Handlers
// ============================================================================

/// The add-content form, including the hidden view state it was posted from.
#[derive(Debug, Deserialize)]
pub struct CreateContentForm {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub columns: Option<String>,
}

impl CreateContentForm {
    fn into_parts(self) -> Result<(ContentDraft, GridQuery), AppError> {
        let query = GridParams {
            category: self.category,
            q: self.q,
            columns: self.columns,
            width: None,
        }
        .grid_query()?;

        let content_type = ContentType::from_name(&self.content_type).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown content type: {}", self.content_type))
        })?;

        let draft = ContentDraft {
            title: self.title,
            content_type,
            link: self.link,
            description: self.description,
            tags: TagSet::parse(&self.tags),
        };
        Ok((draft, query))
    }
}

pub async fn create_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CreateContentForm>,
) -> Result<Response, AppError> {
    let session = session_from(&headers);
    let (draft, query) = form.into_parts()?;

    match draft.clone().validate() {
        Ok(body) => {
            state.api.create_content(&session, &body).await?;
            tracing::info!(title = %body.title, kind = %body.content_type, "created content");
            Ok(Redirect::to(&dashboard_url(&query, &query.category)).into_response())
        }
        Err(err) => {
            tracing::warn!(%err, "rejected content draft");
            let message = err.to_string();
            let html = render_with_draft(&state, &session, &query, &draft, Some(&message)).await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// Auto-fill from the add-content form: look the link up and re-render the
/// form with the suggestions merged in. A failed lookup keeps what the user
/// typed and asks them to fill the rest in.
pub async fn autofill_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<CreateContentForm>,
) -> Result<Response, AppError> {
    let session = session_from(&headers);
    let (mut draft, query) = form.into_parts()?;

    let link = if draft.link.trim().is_empty() {
        Err("Please enter a URL first")
    } else {
        validate_link(&draft.link).map_err(|_| "Please enter a valid link")
    };
    let link = match link {
        Ok(link) => link,
        Err(message) => {
            let html = render_with_draft(&state, &session, &query, &draft, Some(message)).await?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
        }
    };

    let error = match state
        .api
        .fetch_metadata(&session, link.as_str(), draft.content_type)
        .await
    {
        Ok(meta) => {
            draft.apply_metadata(meta);
            None
        }
        Err(err) => {
            tracing::warn!(%err, link = %link, "metadata lookup failed");
            Some("Failed to fetch content details. Please fill them manually.")
        }
    };

    let html = render_with_draft(&state, &session, &query, &draft, error).await?;
    Ok(Html(html).into_response())
}

/// Single item page with a large embed.
pub async fn content_detail(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let items = state.api.list_content(&session_from(&headers)).await?;
    let item = items
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| AppError::NotFound(format!("No content with id {}", id)))?;

    Ok(Html(render_content_page(item)))
}

pub async fn delete_content(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    state.api.delete_content(&session_from(&headers), &id).await?;
    tracing::info!(%id, "deleted content");
    Ok(Redirect::to("/"))
}

// ============================================================================
// Metadata Auto-fill
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MetadataLookup {
    pub link: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Ask the Content API about a link and merge its answer into what the user
/// already typed.
pub async fn lookup_metadata(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<MetadataLookup>, JsonRejection>,
) -> Result<Json<ContentMetadata>, AppError> {
    let Json(lookup) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if lookup.link.trim().is_empty() {
        return Err(AppError::BadRequest("Please enter a URL first".to_string()));
    }
    let link = validate_link(&lookup.link).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let meta = state
        .api
        .fetch_metadata(&session_from(&headers), link.as_str(), lookup.content_type)
        .await?;

    let mut draft = ContentDraft::new(lookup.content_type);
    draft.title = lookup.title;
    draft.description = lookup.description;
    draft.tags.extend(&lookup.tags);
    draft.apply_metadata(meta);

    Ok(Json(ContentMetadata {
        title: Some(draft.title).filter(|t| !t.is_empty()),
        description: Some(draft.description).filter(|d| !d.is_empty()),
        tags: draft.tags.into_vec(),
    }))
}

// ============================================================================
// Sharing Handlers
// ============================================================================

pub async fn share_brain(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let link = state.api.share_brain(&session_from(&headers), true).await?;
    let share_id = share_id_from_link(&link)
        .ok_or_else(|| AppError::Upstream(format!("share link without an id: {:?}", link)))?;
    tracing::info!(%share_id, "shared brain");

    Ok(Html(render_share_link(&state.config.share_url(&share_id))))
}

pub async fn shared_view(
    Path(share_id): Path<String>,
    Query(params): Query<GridParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let columns = params.column_count()?;
    let brain = state.api.shared_brain(&share_id).await?;
    let query = GridQuery {
        columns,
        ..GridQuery::default()
    };
    let grid = query.apply(&brain.content)?;

    Ok(Html(render_shared(&brain.username, &grid)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(columns: Option<&str>, width: Option<&str>) -> GridParams {
        GridParams {
            columns: columns.map(str::to_string),
            width: width.map(str::to_string),
            ..GridParams::default()
        }
    }

    #[test]
    fn test_column_count_resolution() {
        assert_eq!(params(None, None).column_count().unwrap(), DEFAULT_COLUMNS);
        assert_eq!(params(Some("2"), Some("2000")).column_count().unwrap(), 2);
        assert_eq!(params(None, Some("800")).column_count().unwrap(), 2);
        assert_eq!(params(Some(""), Some("2000")).column_count().unwrap(), 4);
        assert_eq!(params(Some("0"), None).column_count().unwrap(), 0);
    }

    #[test]
    fn test_column_count_rejects_bad_input() {
        assert!(matches!(
            params(Some("many"), None).column_count(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            params(Some("9"), None).column_count(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            params(None, Some("-1")).column_count(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_grid_query_defaults() {
        let query = GridParams::default().grid_query().unwrap();
        assert_eq!(query, GridQuery::default());

        let query = GridParams {
            category: Some("document".to_string()),
            q: Some("rust".to_string()),
            ..GridParams::default()
        }
        .grid_query()
        .unwrap();
        assert_eq!(query.category, Category::Kind(ContentType::Document));
        assert_eq!(query.search, "rust");
    }

    fn form(content_type: &str, tags: &str) -> CreateContentForm {
        CreateContentForm {
            title: "t".to_string(),
            content_type: content_type.to_string(),
            link: "https://x.com/a".to_string(),
            description: String::new(),
            tags: tags.to_string(),
            category: None,
            q: None,
            columns: None,
        }
    }

    #[test]
    fn test_form_into_parts() {
        let (draft, query) = form("twitter", "a, b, a").into_parts().unwrap();
        assert_eq!(draft.content_type, ContentType::Twitter);
        assert_eq!(draft.tags.into_vec(), vec!["a", "b"]);
        assert_eq!(query, GridQuery::default());

        assert!(matches!(
            form("podcast", "").into_parts(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_form_keeps_view_state() {
        let posted = CreateContentForm {
            category: Some("youtube".to_string()),
            q: Some("talk".to_string()),
            columns: Some("2".to_string()),
            ..form("document", "")
        };
        let (_, query) = posted.into_parts().unwrap();
        assert_eq!(query.category, Category::Kind(ContentType::Youtube));
        assert_eq!(query.search, "talk");
        assert_eq!(query.columns, 2);
    }

    #[test]
    fn test_session_forwards_cookie_header_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "connect.sid=s%3Aabc%3Bdef.sig; token=a%20b".parse().unwrap(),
        );
        assert_eq!(
            session_from(&headers).cookie_header(),
            Some("connect.sid=s%3Aabc%3Bdef.sig; token=a%20b")
        );

        headers.append(COOKIE, "theme=dark".parse().unwrap());
        assert_eq!(
            session_from(&headers).cookie_header(),
            Some("connect.sid=s%3Aabc%3Bdef.sig; token=a%20b; theme=dark")
        );

        assert_eq!(session_from(&HeaderMap::new()), Session::anonymous());
    }
}
