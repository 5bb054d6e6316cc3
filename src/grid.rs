//! Card distribution for the dashboard grid.
//!
//! Items are filtered by category and search term, then dealt round-robin
//! into a fixed number of columns. Everything here is pure: the caller owns
//! the view state and passes it in as a [`GridQuery`] on every recomputation.

use crate::models::{ContentItem, ContentType};
use std::fmt;
use thiserror::Error;

/// Column count used when the request gives neither columns nor a width.
pub const DEFAULT_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// ============================================================================
// Category
// ============================================================================

/// The sidebar filter. Parsing is total: values that name no content type
/// (such as `tags`) are kept as `Other` and match no item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Kind(ContentType),
    Other(String),
}

impl Category {
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            return Category::All;
        }
        match ContentType::from_name(value) {
            Some(kind) => Category::Kind(kind),
            None => Category::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::All => "all",
            Category::Kind(kind) => kind.as_str(),
            Category::Other(other) => other,
        }
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        match self {
            Category::All => true,
            Category::Kind(kind) => item.content_type == *kind,
            Category::Other(_) => false,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Filtering
// ============================================================================

/// Case-insensitive match of `search_term` against title, description and
/// tag names. A blank term matches everything.
pub fn matches_search(item: &ContentItem, search_term: &str) -> bool {
    let needle = search_term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    matches_needle(item, &needle)
}

fn matches_needle(item: &ContentItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.description_text().to_lowercase().contains(needle)
        || item
            .tags
            .iter()
            .any(|tag| tag.name().to_lowercase().contains(needle))
}

pub fn filter_items<'a>(
    items: &'a [ContentItem],
    category: &Category,
    search_term: &str,
) -> Vec<&'a ContentItem> {
    let needle = search_term.trim().to_lowercase();

    items
        .iter()
        .filter(|item| category.matches(item))
        .filter(|item| needle.is_empty() || matches_needle(item, &needle))
        .collect()
}

// ============================================================================
// Distribution
// ============================================================================

/// Filter `items` and deal them into `column_count` columns: the item at
/// filtered position `i` lands in column `i % column_count`.
pub fn distribute<'a>(
    items: &'a [ContentItem],
    category: &Category,
    search_term: &str,
    column_count: usize,
) -> Result<Vec<Vec<&'a ContentItem>>, GridError> {
    if column_count == 0 {
        return Err(GridError::InvalidArgument(
            "column count must be at least 1".to_string(),
        ));
    }

    let filtered = filter_items(items, category, search_term);
    let mut columns: Vec<Vec<&ContentItem>> = vec![Vec::new(); column_count];

    for (index, item) in filtered.into_iter().enumerate() {
        columns[index % column_count].push(item);
    }

    tracing::debug!(
        category = %category,
        columns = column_count,
        shown = columns.iter().map(Vec::len).sum::<usize>(),
        total = items.len(),
        "distributed cards"
    );

    Ok(columns)
}

/// Responsive column policy keyed on viewport width in CSS pixels.
pub fn columns_for_width(width: u32) -> usize {
    match width {
        0..=639 => 1,
        640..=1023 => 2,
        1024..=1535 => 3,
        _ => 4,
    }
}

// ============================================================================
// View State
// ============================================================================

/// Immutable view state for one grid computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridQuery {
    pub category: Category,
    pub search: String,
    pub columns: usize,
}

impl Default for GridQuery {
    fn default() -> Self {
        Self {
            category: Category::All,
            search: String::new(),
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl GridQuery {
    pub fn apply<'a>(
        &self,
        items: &'a [ContentItem],
    ) -> Result<Vec<Vec<&'a ContentItem>>, GridError> {
        distribute(items, &self.category, &self.search, self.columns)
    }
}
