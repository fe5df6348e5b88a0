//! HTML preview of projected Markdown, as shown in the preview tab.

use pulldown_cmark::{Options, Parser, html};

/// Render `markdown` to HTML. Raw HTML in the input (iframes, `<sup>`)
/// is passed through unchanged.
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
