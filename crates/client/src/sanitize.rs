//! Query sanitization.
//!
//! User input reaches the cache key and the wire request, so executable
//! markup has to be stripped out first. The input is parsed as an HTML
//! fragment; unsafe elements are dropped together with their content, any
//! remaining markup is reduced to its text, and whitespace runs collapse
//! to single spaces so the result is a stable cache key.

use scraper::{Html, node::Node};

/// Elements removed together with everything inside them.
const BLOCKED_ELEMENTS: &[&str] = &["script", "style", "iframe", "object", "embed", "noscript", "template"];

/// Strip unsafe markup from raw user input.
///
/// Pure and deterministic, with no side effects. Never fails: malformed
/// input degrades to whatever text survives the parse.
pub fn sanitize(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut text = String::new();
    append_text(fragment.tree.root(), &mut text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn append_text(node: ego_tree::NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(t) => out.push_str(&t),
            Node::Element(el) if BLOCKED_ELEMENTS.contains(&el.name()) => {}
            _ => append_text(child, out),
        }
    }
}
