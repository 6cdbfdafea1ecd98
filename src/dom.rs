//! Markup Query Facade
//!
//! Thin adapter over the `dom_query` crate. Segmentation and metadata code
//! talk to the tree only through these functions: parse, query by selector,
//! read text and attributes, serialize.
//!
//! `Document` is not `Send`. Parse and query inside synchronous code only and
//! never hold a tree across an `.await`.

pub use dom_query::{Document, NodeRef, Selection};

/// Elements whose text is never page content.
const NON_CONTENT_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Check if attribute exists (with any value, including empty)
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Text Content ===

/// Raw text content of node and descendants, whitespace untouched.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> String {
    sel.text().to_string()
}

/// Plain text of a block: every visible text node trimmed, empty ones
/// dropped, the rest joined with a single space. Text inside `script`,
/// `style`, `noscript` and `template` is skipped.
///
/// `<h2>A</h2><p>B</p>` reads as `"A B"`.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    visible_text_nodes(sel)
        .iter()
        .map(|text| normalize_whitespace(text))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain text of an inline run (heading, link, list item, cell): visible
/// text nodes concatenated as-is, then whitespace-collapsed.
///
/// `<h2>Opening <em>hours</em></h2>` reads as `"Opening hours"`.
#[must_use]
pub fn inline_text(sel: &Selection) -> String {
    normalize_whitespace(&visible_text_nodes(sel).concat())
}

fn visible_text_nodes(sel: &Selection) -> Vec<String> {
    let mut out = Vec::new();
    for root in sel.nodes() {
        if is_non_content(root) {
            continue;
        }
        for node in root.descendants() {
            if node.is_text() && !under_non_content(&node, root) {
                out.push(node.text().to_string());
            }
        }
    }
    out
}

fn is_non_content(node: &NodeRef) -> bool {
    node.node_name()
        .is_some_and(|tag| NON_CONTENT_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)))
}

/// Whether a non-content element sits between `node` and `root`.
fn under_non_content(node: &NodeRef, root: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id == root.id {
            return false;
        }
        if is_non_content(&parent) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Serialized markup of the element itself, tags included.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> String {
    sel.html().to_string()
}

// === Querying ===

/// All descendants matching a CSS selector, in document order, one
/// single-node selection per match.
#[must_use]
pub fn query_all<'a>(sel: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    sel.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// All elements of the document matching a CSS selector, in document order.
#[must_use]
pub fn document_query_all<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// First element of the document matching a CSS selector.
#[must_use]
pub fn document_query<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .first()
        .map(|node| Selection::from(*node))
}

// === String Utilities ===

/// First `max_chars` characters of `s`. Counts `char`s, never splits one.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select() {
        let doc = parse(r#"<div id="main" class="container">content</div>"#);
        let div = doc.select("div");

        assert_eq!(get_attribute(&div, "id"), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("container".to_string()));
    }

    #[test]
    fn test_missing_attributes_return_none() {
        let doc = parse(r#"<div>no attributes</div>"#);
        let div = doc.select("div");

        assert_eq!(class_name(&div), None);
        assert_eq!(get_attribute(&div, "data-test"), None);
        assert!(!has_attribute(&div, "hidden"));
    }

    #[test]
    fn test_boolean_attribute_presence() {
        let doc = parse(r#"<div hidden>secret</div>"#);
        assert!(has_attribute(&doc.select("div"), "hidden"));
    }

    #[test]
    fn test_tag_name() {
        let doc = parse(r#"<main><section>content</section></main>"#);

        assert_eq!(tag_name(&doc.select("main")), Some("main".to_string()));
        assert_eq!(tag_name(&doc.select("section")), Some("section".to_string()));
    }

    #[test]
    fn test_normalized_text_collapses_whitespace() {
        let doc = parse("<div>\n   text <span>nested</span>\t\n more  </div>");
        let div = doc.select("div");

        assert_eq!(normalized_text(&div), "text nested more");
        assert!(text_content(&div).contains('\n'));
    }

    #[test]
    fn test_normalized_text_separates_adjacent_blocks() {
        let doc = parse("<section><h2>A</h2><p>B</p></section>");
        assert_eq!(normalized_text(&doc.select("section")), "A B");

        let doc = parse("<div><p>Fresh</p><p>bread</p><p>baked daily</p></div>");
        assert_eq!(normalized_text(&doc.select("div")), "Fresh bread baked daily");
    }

    #[test]
    fn test_normalized_text_skips_script_and_style() {
        let doc = parse(
            r#"<div id="app">Loading...<script>window.__STATE__ = {"items": [1, 2, 3]};</script>
            <style>.app { color: red; }</style><noscript>Enable JavaScript</noscript></div>"#,
        );
        let div = doc.select("div");

        assert_eq!(normalized_text(&div), "Loading...");
        assert_eq!(inline_text(&div), "Loading...");
    }

    #[test]
    fn test_script_selection_has_no_text() {
        let doc = parse("<body><script>var x = 1;</script></body>");
        assert_eq!(normalized_text(&doc.select("script")), "");
    }

    #[test]
    fn test_inline_text_keeps_inline_runs_together() {
        let doc = parse("<h2>Opening <em>hours</em></h2><li>Sour<b>dough</b></li>");

        assert_eq!(inline_text(&doc.select("h2")), "Opening hours");
        assert_eq!(inline_text(&doc.select("li")), "Sourdough");
    }

    #[test]
    fn test_query_all_in_document_order() {
        let doc = parse(
            r#"
            <section id="a"><div id="b"></div></section>
            <div id="c"></div>
        "#,
        );
        let ids: Vec<_> = document_query_all(&doc, "section, div")
            .iter()
            .filter_map(|s| get_attribute(s, "id"))
            .collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_query_all_descendants_only() {
        let doc = parse(r#"<div id="outer"><div id="inner"></div></div>"#);
        let outer = doc.select("#outer");

        let found = query_all(&outer, "div");
        assert_eq!(found.len(), 1);
        assert_eq!(get_attribute(&found[0], "id"), Some("inner".to_string()));
    }

    #[test]
    fn test_document_query_missing() {
        let doc = parse("<p>only</p>");
        assert!(document_query(&doc, "title").is_none());
        assert!(document_query(&doc, "p").is_some());
    }

    #[test]
    fn test_outer_html_includes_tag() {
        let doc = parse(r#"<div class="x"><b>hi</b></div>"#);
        let html = outer_html(&doc.select("div"));

        assert!(html.starts_with("<div"));
        assert!(html.contains("<b>hi</b>"));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
    }
}
