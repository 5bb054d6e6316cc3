//! Client for the remote Content API.
//!
//! Every call is a single request/response round trip. The caller's cookie
//! header is forwarded verbatim so the backend can resolve the session.

use crate::models::{
    ContentItem, ContentList, ContentMetadata, ContentType, DeleteContentRequest,
    MetadataRequest, NewContent, ShareRequest, ShareResponse, SharedBrain,
};
use reqwest::header::COOKIE;
use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use thiserror::Error;
use url::Url;

// Relative to the base URL, so a base path such as `/backend/` is kept.
const CONTENT_PATH: &str = "api/v1/content";
const METADATA_PATH: &str = "api/v1/content/metadata";
const SHARE_PATH: &str = "api/v1/brain/share";
const BRAIN_PATH: &str = "api/v1/brain/";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to content service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid content service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("not signed in to the content service")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("content service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// The caller's cookies, forwarded to the Content API as a `Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session(Option<String>);

impl Session {
    pub fn anonymous() -> Self {
        Session(None)
    }

    pub fn from_cookie_header(header: impl Into<String>) -> Self {
        let header = header.into();
        if header.trim().is_empty() {
            Session(None)
        } else {
            Session(Some(header))
        }
    }

    pub fn cookie_header(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct ContentApi {
    base_url: Url,
    http: reqwest::Client,
}

impl ContentApi {
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn with_session(builder: RequestBuilder, session: &Session) -> RequestBuilder {
        match session.cookie_header() {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 | 403 => Err(ApiError::Unauthorized),
            404 => Err(ApiError::NotFound),
            code => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(status = code, %body, "content service rejected request");
                Err(ApiError::Status { status: code, body })
            }
        }
    }

    // ========================================================================
    // Content
    // ========================================================================

    pub async fn list_content(&self, session: &Session) -> Result<Vec<ContentItem>, ApiError> {
        let url = self.endpoint(CONTENT_PATH)?;
        let request = Self::with_session(self.http.get(url), session);
        let list: ContentList = Self::send(request).await?.json().await?;
        tracing::debug!(count = list.content.len(), "fetched content");
        Ok(list.content)
    }

    pub async fn create_content(
        &self,
        session: &Session,
        content: &NewContent,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(CONTENT_PATH)?;
        let request = Self::with_session(self.http.post(url).json(content), session);
        Self::send(request).await?;
        Ok(())
    }

    pub async fn delete_content(&self, session: &Session, content_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(CONTENT_PATH)?;
        let body = DeleteContentRequest { content_id };
        let request = Self::with_session(self.http.delete(url).json(&body), session);
        Self::send(request).await?;
        Ok(())
    }

    pub async fn fetch_metadata(
        &self,
        session: &Session,
        link: &str,
        content_type: ContentType,
    ) -> Result<ContentMetadata, ApiError> {
        let url = self.endpoint(METADATA_PATH)?;
        let body = MetadataRequest {
            link: link.to_string(),
            content_type,
        };
        let request = Self::with_session(self.http.post(url).json(&body), session);
        Ok(Self::send(request).await?.json().await?)
    }

    // ========================================================================
    // Sharing
    // ========================================================================

    /// Turn sharing on or off; returns the share link reported by the backend.
    pub async fn share_brain(&self, session: &Session, share: bool) -> Result<String, ApiError> {
        let url = self.endpoint(SHARE_PATH)?;
        let request = Self::with_session(self.http.post(url).json(&ShareRequest { share }), session);
        let response: ShareResponse = Self::send(request).await?.json().await?;
        Ok(response.link)
    }

    /// Public, read-only view of a shared collection.
    pub async fn shared_brain(&self, share_id: &str) -> Result<SharedBrain, ApiError> {
        let url = self.endpoint(&format!("{}{}", BRAIN_PATH, urlencoding::encode(share_id)))?;
        Ok(Self::send(self.http.get(url)).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> ContentApi {
        ContentApi::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_onto_root() {
        let root = api("http://localhost:3000");
        assert_eq!(
            root.endpoint(CONTENT_PATH).unwrap().as_str(),
            "http://localhost:3000/api/v1/content"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let with_slash = api("https://backend.example.com/prefix/");
        assert_eq!(
            with_slash.endpoint(SHARE_PATH).unwrap().as_str(),
            "https://backend.example.com/prefix/api/v1/brain/share"
        );

        let without_slash = api("https://backend.example.com/prefix");
        assert_eq!(
            without_slash.base_url().as_str(),
            "https://backend.example.com/prefix/"
        );
        assert_eq!(
            without_slash.endpoint(&format!("{}{}", BRAIN_PATH, "abc")).unwrap().as_str(),
            "https://backend.example.com/prefix/api/v1/brain/abc"
        );
    }

    #[test]
    fn test_session_from_blank_header_is_anonymous() {
        assert_eq!(Session::from_cookie_header("  "), Session::anonymous());
        assert_eq!(
            Session::from_cookie_header("token=abc").cookie_header(),
            Some("token=abc")
        );
    }
}
