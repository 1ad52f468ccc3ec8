//! HTML rendering of the markdown stored in recipe text fields.

use pulldown_cmark::{html, Options, Parser};

/// Render a markdown field to an HTML fragment.
///
/// Plain CommonMark only: ingredient lists become `<ul>`, numbered steps
/// become `<ol>`, and loose text becomes `<p>`. Empty input renders to "".
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
