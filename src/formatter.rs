//! Inline text formatting for card descriptions.
//!
//! Descriptions carry a tiny markup: `**bold**`, `__underline__` and a
//! leading `• ` bullet per line. Each line is HTML-escaped before the markup
//! is substituted, so the output is safe to drop straight into a page.

use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").expect("underline pattern is valid"));

const BULLET: &str = "• ";
const LINE_BREAK: &str = "<br/>";

// ============================================================================
// HTML Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Description Formatting
// ============================================================================

/// Render a raw description as markup. Empty input renders as empty output.
pub fn format_description(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    raw.split('\n')
        .map(|line| format_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn format_line(line: &str) -> String {
    let escaped = html_escape(line);
    let bolded = BOLD.replace_all(&escaped, r#"<span class="font-bold">${1}</span>"#);
    let underlined = UNDERLINE.replace_all(&bolded, r#"<span class="underline">${1}</span>"#);

    match underlined.strip_prefix(BULLET) {
        Some(rest) => format!(r#"<li class="ml-4">{}</li>"#, rest),
        None => underlined.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!(
            format_description("**hi**"),
            r#"<span class="font-bold">hi</span>"#
        );
    }

    #[test]
    fn test_underline() {
        assert_eq!(
            format_description("__hi__"),
            r#"<span class="underline">hi</span>"#
        );
    }

    #[test]
    fn test_bullet() {
        assert_eq!(format_description("• item"), r#"<li class="ml-4">item</li>"#);
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_description(""), "");
    }

    #[test]
    fn test_non_greedy_and_empty_spans() {
        assert_eq!(
            format_description("**a** and **b**"),
            r#"<span class="font-bold">a</span> and <span class="font-bold">b</span>"#
        );
        assert_eq!(format_description("****"), r#"<span class="font-bold"></span>"#);
        assert_eq!(format_description("**open"), "**open");
    }

    #[test]
    fn test_lines_joined_with_break_marker() {
        assert_eq!(
            format_description("first\n• **second**\r\n\nlast __u__"),
            concat!(
                "first<br/>",
                r#"<li class="ml-4"><span class="font-bold">second</span></li>"#,
                "<br/><br/>",
                r#"last <span class="underline">u</span>"#
            )
        );
    }

    #[test]
    fn test_bullet_needs_leading_marker_and_space() {
        assert_eq!(format_description(" • x"), " • x");
        assert_eq!(format_description("•x"), "•x");
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        assert_eq!(
            format_description("<script>alert('x')</script> **&**"),
            concat!(
                "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; ",
                r#"<span class="font-bold">&amp;</span>"#
            )
        );
    }

    #[test]
    fn test_is_deterministic() {
        let raw = "• __a__ **b**\nc";
        assert_eq!(format_description(raw), format_description(raw));
    }
}
