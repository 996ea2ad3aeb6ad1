//! Markdown rendering for calculator copy

use pulldown_cmark::{html, Options, Parser};

/// Render trusted, compiled-in Markdown to HTML
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_and_lists() {
        let html = to_html("After each **half-life**\n\n- one\n- two");
        assert!(html.contains("<strong>half-life</strong>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }
}
