//! Link handling for saved content.
//!
//! This module provides:
//! - Validation of links submitted for new content (absolute HTTP(S) only)
//! - Display-time embed link derivation per content type
//! - Share identifier extraction from share links

use crate::models::ContentType;
use thiserror::Error;
use url::Url;

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com"];
const YOUTUBE_SHORT_HOST: &str = "youtu.be";
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const X_HOSTS: &[&str] = &["x.com", "www.x.com"];
const TWITTER_HOST: &str = "twitter.com";

/// Result of link validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Link is blank
    #[error("Link is empty")]
    Empty,
    /// Link is malformed or cannot be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Link uses a scheme other than http or https
    #[error("Only http and https links are allowed, got {0}")]
    UnsupportedScheme(String),
    /// Link has no host
    #[error("Link has no host")]
    MissingHost,
}

/// Validate a link before it is sent to the Content API.
pub fn validate_link(link: &str) -> Result<Url, LinkError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(LinkError::Empty);
    }

    let url = Url::parse(link).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(LinkError::UnsupportedScheme(url.scheme().to_string()));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(LinkError::MissingHost),
    }
}

// ============================================================================
// Embed Links
// ============================================================================

/// Derive the link used to embed an item. The stored link is never changed;
/// links that are not recognised come back as they are.
pub fn embed_link(content_type: ContentType, link: &str) -> String {
    let derived = match content_type {
        ContentType::Youtube => youtube_embed(link),
        ContentType::Twitter => twitter_embed(link),
        ContentType::Document => None,
    };
    derived.unwrap_or_else(|| link.to_string())
}

fn youtube_embed(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?.to_lowercase();

    let video_id = if YOUTUBE_HOSTS.contains(&host.as_str()) {
        if url.path() != "/watch" {
            return None;
        }
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    } else if host == YOUTUBE_SHORT_HOST {
        url.path_segments()?.next()?.to_string()
    } else {
        return None;
    };

    if video_id.is_empty() {
        return None;
    }
    Some(format!(
        "{}{}",
        YOUTUBE_EMBED_BASE,
        urlencoding::encode(&video_id)
    ))
}

fn twitter_embed(link: &str) -> Option<String> {
    let mut url = Url::parse(link).ok()?;
    let host = url.host_str()?.to_lowercase();

    if !X_HOSTS.contains(&host.as_str()) {
        return None;
    }
    url.set_host(Some(TWITTER_HOST)).ok()?;
    Some(url.to_string())
}

// ============================================================================
// Share Links
// ============================================================================

/// Extract the share identifier from a share link: the last non-empty path
/// segment, or the trimmed value itself when it is a bare identifier.
pub fn share_id_from_link(link: &str) -> Option<String> {
    let link = link.trim();
    let candidate = match Url::parse(link) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        Err(_) => link
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string),
    };
    candidate.filter(|id| !id.is_empty())
}
