//! Markdown rendering and summarization.
//!
//! Uses pulldown-cmark directly for markdown → HTML conversion. Parts are
//! rendered independently; each conversion is stateless.

pub mod context;

use pulldown_cmark::{Options, Parser, html::push_html};

/// Word budget for the automatic entry summary.
const SUMMARY_WORDS: usize = 28;

/// Render markdown to HTML.
///
/// Uses pulldown-cmark with tables, footnotes, and strikethrough enabled.
/// Empty input renders to an empty string rather than an empty paragraph.
pub fn markdown_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);

    let mut html = String::with_capacity(text.len() * 2);
    push_html(&mut html, parser);
    html
}

/// Build an automatic summary from rendered HTML: tags stripped, first
/// words joined, ellipsis appended.
pub fn autosummarize(html: &str) -> String {
    let text = strip_tags(html);
    let words: Vec<&str> = text.split_whitespace().take(SUMMARY_WORDS).collect();
    format!("{}...", words.join(" "))
}

/// Strip HTML tags and decode the predefined entities.
///
/// Good enough for summarization; not a general HTML-to-text converter.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_basic() {
        let html = markdown_to_html("Some *text*.");
        assert_eq!(html.trim(), "<p>Some <em>text</em>.</p>");
    }

    #[test]
    fn test_markdown_empty() {
        assert_eq!(markdown_to_html(""), "");
    }

    #[test]
    fn test_markdown_heading_and_code() {
        let html = markdown_to_html("# Title\n\n`code`\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_markdown_table_extension() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_markdown_strikethrough() {
        let html = markdown_to_html("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <em>world</em></p>"), "Hello world");
        assert_eq!(strip_tags("no tags"), "no tags");
        assert_eq!(strip_tags("<a href=\"x\">link</a>"), "link");
    }

    #[test]
    fn test_strip_tags_entities() {
        assert_eq!(strip_tags("a &amp; b &lt;c&gt;"), "a & b <c>");
    }

    #[test]
    fn test_autosummarize_short() {
        let html = "<p>Just a few words here.</p>";
        assert_eq!(autosummarize(html), "Just a few words here....");
    }

    #[test]
    fn test_autosummarize_truncates() {
        let words: Vec<String> = (0..50).map(|i| format!("w{i}")).collect();
        let html = format!("<p>{}</p>", words.join(" "));
        let summary = autosummarize(&html);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.split_whitespace().count(), 28);
        assert!(summary.starts_with("w0 w1"));
    }
}
