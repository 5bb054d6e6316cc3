//! Full pages: dashboard, content page, shared view, share link and the
//! add-content form.

use super::cards::{render_card, render_grid, CardMode};
use super::components::{base_html, search_bar, sidebar, view_state_fields};
use crate::draft::ContentDraft;
use crate::formatter::html_escape;
use crate::grid::GridQuery;
use crate::models::{ContentItem, ContentType};

/// Everything the dashboard page needs for one render.
pub struct DashboardView<'a> {
    pub query: &'a GridQuery,
    pub columns: &'a [Vec<&'a ContentItem>],
    pub draft: Option<&'a ContentDraft>,
    pub error: Option<&'a str>,
}

fn heading(query: &GridQuery) -> String {
    let name = query.category.as_str();
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{} Content", capitalized)
}

// ============================================================================
// Add Content Form
// ============================================================================

/// The form posts the current view along with the draft so a re-render keeps
/// the same category, search and columns. The auto-fill button posts the same
/// fields to `/content/autofill`.
pub fn render_create_form(
    query: &GridQuery,
    draft: Option<&ContentDraft>,
    error: Option<&str>,
) -> String {
    let empty = ContentDraft::new(ContentType::Youtube);
    let draft = draft.unwrap_or(&empty);

    let options: String = ContentType::ALL
        .iter()
        .map(|t| {
            let selected = if *t == draft.content_type { " selected" } else { "" };
            format!(r#"<option value="{t}"{selected}>{t}</option>"#, t = t, selected = selected)
        })
        .collect();

    let error_html = error
        .map(|e| format!(r#"<p class="form-error">{}</p>"#, html_escape(e)))
        .unwrap_or_default();

    let tags = draft.tags.iter().collect::<Vec<_>>().join(", ");

    format!(
        r#"<form class="create-content" action="/content" method="post">
            <h2>Add Content</h2>
            {error_html}
            {view_state}
            <label>Title <input type="text" name="title" value="{title}"></label>
            <label>Type <select name="type">{options}</select></label>
            <label>Link <input type="url" name="link" value="{link}"></label>
            <button type="submit" formaction="/content/autofill">Auto-fill</button>
            <label>Description <textarea name="description" placeholder="**bold**, __underline__, • bullet">{description}</textarea></label>
            <label>Tags <input type="text" name="tags" placeholder="comma, separated" value="{tags}"></label>
            <button type="submit">Add Content</button>
        </form>"#,
        error_html = error_html,
        view_state = view_state_fields(query),
        title = html_escape(&draft.title),
        options = options,
        link = html_escape(&draft.link),
        description = html_escape(&draft.description),
        tags = html_escape(&tags),
    )
}

// ============================================================================
// Dashboard
// ============================================================================

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let count: usize = view.columns.iter().map(Vec::len).sum();
    let grid = if count == 0 {
        r#"<p class="empty">Nothing here yet.</p>"#.to_string()
    } else {
        render_grid(view.columns, CardMode::Owner)
    };
    let title = heading(view.query);

    let content = format!(
        r#"<div class="dashboard">
            {sidebar}
            <main class="main">
                <header class="main-header">
                    <h1>{title}</h1>
                    {search}
                    <form action="/share" method="post"><button type="submit">Share Brain</button></form>
                </header>
                {grid}
                {form}
            </main>
        </div>"#,
        sidebar = sidebar(view.query),
        title = html_escape(&title),
        search = search_bar(view.query),
        grid = grid,
        form = render_create_form(view.query, view.draft, view.error),
    );

    base_html(&title, &content)
}

// ============================================================================
// Content Page
// ============================================================================

pub fn render_content_page(item: &ContentItem) -> String {
    let content = format!(
        r#"<div class="content-page">
            <a class="back" href="/">Back to dashboard</a>
            {card}
        </div>"#,
        card = render_card(item, CardMode::Detail),
    );
    base_html(&item.title, &content)
}

// ============================================================================
// Sharing
// ============================================================================

pub fn render_share_link(share_url: &str) -> String {
    let content = format!(
        r#"<div class="share-link">
            <h1>Share Your Second Brain</h1>
            <p>Anyone with this link can view your collection.</p>
            <input type="text" readonly value="{url}">
            <a href="{url}">Open shared view</a>
            <a href="/">Back to dashboard</a>
        </div>"#,
        url = html_escape(share_url),
    );
    base_html("Share", &content)
}

pub fn render_shared(username: &str, columns: &[Vec<&ContentItem>]) -> String {
    let title = format!("{}'s Second Brain", username);
    let content = format!(
        r#"<div class="shared">
            <header class="shared-header">
                <h1>{title}</h1>
                <p>Explore this curated collection of content</p>
                <a class="cta" href="/">Create Your Own Second Brain</a>
            </header>
            {grid}
        </div>"#,
        title = html_escape(&title),
        grid = render_grid(columns, CardMode::Shared),
    );
    base_html(&title, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::TagSet;
    use crate::grid::Category;

    #[test]
    fn test_heading_capitalizes_category() {
        let mut query = GridQuery::default();
        assert_eq!(heading(&query), "All Content");
        query.category = Category::Kind(ContentType::Youtube);
        assert_eq!(heading(&query), "Youtube Content");
    }

    #[test]
    fn test_create_form_keeps_draft_and_error() {
        let mut draft = ContentDraft::new(ContentType::Twitter);
        draft.title = "A \"quoted\" title".to_string();
        draft.tags = TagSet::parse("a,b");
        let query = GridQuery {
            category: Category::Kind(ContentType::Youtube),
            search: "talk".to_string(),
            columns: 2,
        };
        let html = render_create_form(&query, Some(&draft), Some("Please enter a valid link"));

        assert!(html.contains(r#"<p class="form-error">Please enter a valid link</p>"#));
        assert!(html.contains(r#"name="category" value="youtube""#));
        assert!(html.contains(r#"name="q" value="talk""#));
        assert!(html.contains(r#"name="columns" value="2""#));
        assert!(html.contains(r#"formaction="/content/autofill""#));
        assert!(html.contains(r#"value="A &quot;quoted&quot; title""#));
        assert!(html.contains(r#"<option value="twitter" selected>twitter</option>"#));
        assert!(html.contains(r#"value="a, b""#));
    }

    #[test]
    fn test_content_page_uses_detail_card() {
        let item = ContentItem {
            id: "c1".to_string(),
            title: "Papers & Notes".to_string(),
            content_type: ContentType::Document,
            link: "https://docs.example.com/d".to_string(),
            description: None,
            tags: Vec::new(),
        };
        let html = render_content_page(&item);
        assert!(html.contains("<title>Papers &amp; Notes - Second Brain</title>"));
        assert!(html.contains(r#"<div class="embed embed-large"><iframe src="https://docs.example.com/d""#));
        assert!(html.contains(r#"action="/content/c1/delete""#));
    }

    #[test]
    fn test_shared_page_title() {
        let html = render_shared("Anish", &[Vec::new()]);
        assert!(html.contains("Anish&#39;s Second Brain"));
        assert!(html.contains("Create Your Own Second Brain"));
    }

    #[test]
    fn test_empty_dashboard() {
        let query = GridQuery::default();
        let columns: Vec<Vec<&ContentItem>> = vec![Vec::new(); 3];
        let html = render_dashboard(&DashboardView {
            query: &query,
            columns: &columns,
            draft: None,
            error: None,
        });
        assert!(html.contains("Nothing here yet."));
        assert!(html.contains("<h1>All Content</h1>"));
    }
}
