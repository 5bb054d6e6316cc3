//! Shared HTML components: base page, sidebar and search bar.

use crate::formatter::html_escape;
use crate::grid::{Category, GridQuery};

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Second Brain</title>
</head>
<body>
    {content}
    <script async src="https://platform.twitter.com/widgets.js" charset="utf-8"></script>
</body>
</html>"#,
        title = html_escape(title),
        content = content,
    )
}

// ============================================================================
// Links
// ============================================================================

/// Dashboard URL for `query` with its category replaced by `category`.
pub fn dashboard_url(query: &GridQuery, category: &Category) -> String {
    let mut url = format!(
        "/?category={}&columns={}",
        urlencoding::encode(category.as_str()),
        query.columns
    );
    if !query.search.is_empty() {
        url.push_str("&q=");
        url.push_str(&urlencoding::encode(&query.search));
    }
    url
}

/// [`dashboard_url`], escaped for use inside an attribute.
pub(crate) fn dashboard_href(query: &GridQuery, category: &Category) -> String {
    html_escape(&dashboard_url(query, category))
}

/// Hidden inputs that carry the current view through a form post.
pub(crate) fn view_state_fields(query: &GridQuery) -> String {
    format!(
        r#"<input type="hidden" name="category" value="{category}">
            <input type="hidden" name="q" value="{q}">
            <input type="hidden" name="columns" value="{columns}">"#,
        category = html_escape(query.category.as_str()),
        q = html_escape(&query.search),
        columns = query.columns,
    )
}

// ============================================================================
// Sidebar
// ============================================================================

const MENU_ITEMS: &[(&str, &str)] = &[
    ("Tweets", "twitter"),
    ("Youtube", "youtube"),
    ("Document", "document"),
    ("Tags", "tags"),
];

pub fn sidebar(query: &GridQuery) -> String {
    let mut items = String::new();
    for (label, value) in MENU_ITEMS {
        let category = Category::parse(value);
        let class = if category == query.category {
            "menu-item active"
        } else {
            "menu-item"
        };
        items.push_str(&format!(
            r#"<a class="{class}" href="{href}">{label}</a>"#,
            class = class,
            href = dashboard_href(query, &category),
            label = label,
        ));
    }

    format!(
        r#"<aside class="sidebar">
            <a class="brand" href="{home}">Second Brain</a>
            <nav class="menu">{items}</nav>
        </aside>"#,
        home = dashboard_href(query, &Category::All),
        items = items,
    )
}

// ============================================================================
// Search Bar
// ============================================================================

pub fn search_bar(query: &GridQuery) -> String {
    format!(
        r#"<form class="search-bar" action="/" method="get">
            <input type="hidden" name="category" value="{category}">
            <input type="hidden" name="columns" value="{columns}">
            <input type="text" name="q" placeholder="Search by title, tags, or description..." value="{q}">
            <button type="submit">Search</button>
        </form>"#,
        category = html_escape(query.category.as_str()),
        columns = query.columns,
        q = html_escape(&query.search),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;

    #[test]
    fn test_sidebar_marks_active_category() {
        let query = GridQuery {
            category: Category::Kind(ContentType::Twitter),
            search: String::new(),
            columns: 2,
        };
        let html = sidebar(&query);
        assert!(html.contains(r#"<a class="menu-item active" href="/?category=twitter&amp;columns=2">Tweets</a>"#));
        assert!(html.contains(r#"<a class="menu-item" href="/?category=tags&amp;columns=2">Tags</a>"#));
    }

    #[test]
    fn test_search_bar_escapes_term() {
        let query = GridQuery {
            search: r#""><script>"#.to_string(),
            ..GridQuery::default()
        };
        let html = search_bar(&query);
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_view_state_fields() {
        let query = GridQuery {
            category: Category::Kind(ContentType::Document),
            search: "a\"b".to_string(),
            columns: 4,
        };
        let html = view_state_fields(&query);
        assert!(html.contains(r#"name="category" value="document""#));
        assert!(html.contains(r#"name="q" value="a&quot;b""#));
        assert!(html.contains(r#"name="columns" value="4""#));
    }

    #[test]
    fn test_dashboard_href_keeps_search() {
        let query = GridQuery {
            search: "rust & go".to_string(),
            ..GridQuery::default()
        };
        assert_eq!(
            dashboard_href(&query, &Category::All),
            "/?category=all&amp;columns=3&amp;q=rust%20%26%20go"
        );
    }
}
