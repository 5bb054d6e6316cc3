//! Content cards and the column grid.

use crate::formatter::{format_description, html_escape};
use crate::links::validate_link;
use crate::models::{ContentItem, ContentType};

/// Whether a card belongs to the viewer (deletable, links to its own page),
/// to a shared view, or is the viewer's expanded single-item page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    Owner,
    Shared,
    Detail,
}

/// Escaped `src`/`href` value, or None when the link is not plain HTTP(S).
fn safe_link(link: &str) -> Option<String> {
    validate_link(link).ok().map(|_| html_escape(link))
}

fn render_embed(item: &ContentItem, mode: CardMode) -> String {
    let embed = item.embed_link();
    let Some(src) = safe_link(&embed) else {
        return format!(
            r#"<div class="embed"><span class="raw-link">{}</span></div>"#,
            html_escape(&item.link)
        );
    };

    let (width, height, class) = match mode {
        CardMode::Detail => ("100%", "450", "embed embed-large"),
        CardMode::Owner | CardMode::Shared => ("400", "250", "embed"),
    };

    match item.content_type {
        ContentType::Youtube => format!(
            r#"<div class="{class}"><iframe src="{src}" width="{width}" height="{height}" title="YouTube video player" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe></div>"#,
            class = class,
            src = src,
            width = width,
            height = height,
        ),
        ContentType::Twitter => format!(
            r#"<div class="{class}"><blockquote class="twitter-tweet"><a href="{src}">Loading tweet...</a></blockquote></div>"#,
            class = class,
            src = src
        ),
        ContentType::Document => format!(
            r#"<div class="{class}"><iframe src="{src}" title="Document"></iframe></div>"#,
            class = class,
            src = src
        ),
    }
}

pub fn render_card(item: &ContentItem, mode: CardMode) -> String {
    let actions = match mode {
        CardMode::Owner | CardMode::Detail => format!(
            r#"<form class="card-actions" action="/content/{id}/delete" method="post">
                <button type="submit" title="Delete">Delete</button>
            </form>"#,
            id = urlencoding::encode(&item.id)
        ),
        CardMode::Shared => String::new(),
    };

    let title = match mode {
        CardMode::Owner => format!(
            r#"<a href="/content/{id}">{title}</a>"#,
            id = urlencoding::encode(&item.id),
            title = html_escape(&item.title)
        ),
        CardMode::Shared | CardMode::Detail => html_escape(&item.title),
    };

    let description = match item.description_text() {
        "" => String::new(),
        text => format!(
            r#"<div class="description">{}</div>"#,
            format_description(text)
        ),
    };

    let tags: String = item
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">#{}</span>"#, html_escape(tag.name())))
        .collect();

    format!(
        r#"<article class="card card-{kind}">
            <header class="card-header">
                <span class="type-badge">{kind}</span>
                <h3 class="title">{title}</h3>
                {actions}
            </header>
            {embed}
            {description}
            <div class="tags">{tags}</div>
        </article>"#,
        kind = item.content_type,
        title = title,
        actions = actions,
        embed = render_embed(item, mode),
        description = description,
        tags = tags,
    )
}

pub fn render_grid(columns: &[Vec<&ContentItem>], mode: CardMode) -> String {
    let mut html = String::from(r#"<div class="grid">"#);
    for column in columns {
        html.push_str(r#"<div class="column">"#);
        for item in column {
            html.push_str(&render_card(item, mode));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    fn youtube_item() -> ContentItem {
        ContentItem {
            id: "abc/1".to_string(),
            title: "<b>Talk</b>".to_string(),
            content_type: ContentType::Youtube,
            link: "https://www.youtube.com/watch?v=xyz".to_string(),
            description: Some("**key** point".to_string()),
            tags: vec![Tag::from("rust")],
        }
    }

    #[test]
    fn test_owner_card() {
        let html = render_card(&youtube_item(), CardMode::Owner);
        assert!(html.contains("&lt;b&gt;Talk&lt;/b&gt;"));
        assert!(html.contains(r#"src="https://www.youtube.com/embed/xyz""#));
        assert!(html.contains(r#"<span class="font-bold">key</span> point"#));
        assert!(html.contains("#rust"));
        assert!(html.contains(r#"action="/content/abc%2F1/delete""#));
    }

    #[test]
    fn test_shared_card_has_no_actions() {
        let html = render_card(&youtube_item(), CardMode::Shared);
        assert!(!html.contains("/delete"));
        assert!(!html.contains(r#"href="/content/"#));
    }

    #[test]
    fn test_owner_card_links_to_detail_page() {
        let html = render_card(&youtube_item(), CardMode::Owner);
        assert!(html.contains(r#"<a href="/content/abc%2F1">&lt;b&gt;Talk&lt;/b&gt;</a>"#));
        assert!(html.contains(r#"width="400" height="250""#));
    }

    #[test]
    fn test_detail_card_uses_large_embed() {
        let html = render_card(&youtube_item(), CardMode::Detail);
        assert!(html.contains(r#"<div class="embed embed-large">"#));
        assert!(html.contains(r#"width="100%" height="450""#));
        assert!(html.contains(r#"action="/content/abc%2F1/delete""#));
        assert!(!html.contains(r#"href="/content/"#));
    }

    #[test]
    fn test_unsafe_link_is_not_embedded() {
        let item = ContentItem {
            content_type: ContentType::Document,
            link: "javascript:alert(1)".to_string(),
            description: None,
            ..youtube_item()
        };
        let html = render_card(&item, CardMode::Owner);
        assert!(!html.contains("<iframe"));
        assert!(html.contains(r#"<span class="raw-link">javascript:alert(1)</span>"#));
        assert!(!html.contains(r#"class="description""#));
    }

    #[test]
    fn test_twitter_card_uses_twitter_host() {
        let item = ContentItem {
            content_type: ContentType::Twitter,
            link: "https://x.com/a/status/9".to_string(),
            ..youtube_item()
        };
        let html = render_card(&item, CardMode::Shared);
        assert!(html.contains(r#"<a href="https://twitter.com/a/status/9">Loading tweet...</a>"#));
    }

    #[test]
    fn test_grid_renders_one_div_per_column() {
        let item = youtube_item();
        let columns = vec![vec![&item], Vec::new(), Vec::new()];
        let html = render_grid(&columns, CardMode::Shared);
        assert_eq!(html.matches(r#"<div class="column">"#).count(), 3);
        assert_eq!(html.matches("<article").count(), 1);
    }
}
