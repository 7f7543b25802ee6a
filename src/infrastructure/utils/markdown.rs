use ammonia::{Builder, UrlRelative};
use pulldown_cmark::{html, Options, Parser};

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_html(&raw_html)
}

/// Strips scripts, event handlers and relative links from rendered HTML.
pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::Deny)
        .clean(content)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_common_markdown() {
        let html = safe_markdown_to_html("# Title\n\nSome *text*");

        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn drops_inline_scripts() {
        let html = safe_markdown_to_html("hello <script>alert('x')</script>");

        assert!(html.contains("hello"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn external_links_get_safe_rel() {
        let html = safe_markdown_to_html("[site](https://example.com)");

        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("rel=\"nofollow noopener noreferrer\""));
    }
}
