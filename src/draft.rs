//! The "add content" form model.
//!
//! A draft collects what the user typed, merges auto-fill suggestions, and
//! validates into a [`NewContent`] body for the Content API.

use crate::links::{validate_link, LinkError};
use crate::models::{ContentMetadata, ContentType, NewContent};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Please enter a valid link")]
    InvalidLink(#[source] LinkError),
}

// ============================================================================
// Tag Set
// ============================================================================

/// Ordered, duplicate-free tag names. Names are trimmed; comparison is
/// case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list such as `"rust, async,rust"`.
    pub fn parse(list: &str) -> Self {
        let mut set = Self::new();
        set.extend(list.split(','));
        set
    }

    /// Add a tag. Returns false when it is blank or already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.tags.push(name.to_string());
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != name);
        self.tags.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.insert(name.as_ref());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

// ============================================================================
// Draft
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ContentDraft {
    pub title: String,
    pub content_type: ContentType,
    pub link: String,
    pub description: String,
    pub tags: TagSet,
}

impl ContentDraft {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            title: String::new(),
            content_type,
            link: String::new(),
            description: String::new(),
            tags: TagSet::new(),
        }
    }

    /// Merge auto-fill suggestions. Present title/description replace the
    /// typed ones; tags are unioned after the existing ones.
    pub fn apply_metadata(&mut self, meta: ContentMetadata) {
        if let Some(title) = meta.title.filter(|t| !t.trim().is_empty()) {
            self.title = title;
        }
        if let Some(description) = meta.description.filter(|d| !d.is_empty()) {
            self.description = description;
        }
        self.tags.extend(meta.tags);
    }

    pub fn validate(self) -> Result<NewContent, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }
        let link = validate_link(&self.link).map_err(DraftError::InvalidLink)?;

        Ok(NewContent {
            title: title.to_string(),
            content_type: self.content_type,
            link: link.to_string(),
            description: self.description,
            tags: self.tags.into_vec(),
        })
    }
}
