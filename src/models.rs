//! Data models for the Second Brain front end.
//!
//! This module contains the content records served by the remote Content API
//! and the request/response payloads exchanged with it.

use crate::draft::TagSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Core Content Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<Tag>,
}

/// Tags keep their first occurrence; later duplicates and blank names are dropped.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Tag>::deserialize(deserializer)?;
    let mut set = TagSet::new();
    set.extend(raw.iter().map(Tag::name));
    Ok(set.into_vec().into_iter().map(Tag).collect())
}

impl ContentItem {
    /// Description text, with an absent description read as empty.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Link suitable for embedding, derived from the stored link on every call.
    pub fn embed_link(&self) -> String {
        crate::links::embed_link(self.content_type, &self.link)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Youtube,
    Twitter,
    Document,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::Youtube,
        ContentType::Twitter,
        ContentType::Document,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Youtube => "youtube",
            ContentType::Twitter => "twitter",
            ContentType::Document => "document",
        }
    }

    /// Parse the wire name of a type. Case-sensitive, like the wire format.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag name. The Content API sends tags either as bare strings or as
/// `{ "name": ... }` objects; both land here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TagRepr", into = "String")]
pub struct Tag(pub String);

impl Tag {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag(name.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagRepr {
    Named { name: String },
    Plain(String),
}

impl From<TagRepr> for Tag {
    fn from(repr: TagRepr) -> Self {
        match repr {
            TagRepr::Named { name } => Tag(name),
            TagRepr::Plain(name) => Tag(name),
        }
    }
}

// ============================================================================
// Content API Payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ContentList {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

/// Body of `POST /api/v1/content`. Built from a validated draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewContent {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub link: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteContentRequest<'a> {
    #[serde(rename = "contentId")]
    pub content_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareRequest {
    pub share: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareResponse {
    pub link: String,
}

/// A publicly shared collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedBrain {
    pub username: String,
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRequest {
    pub link: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

/// Auto-fill suggestions for a link. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}
