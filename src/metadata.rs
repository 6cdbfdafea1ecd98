//! Metadata extraction.
//!
//! Pulls title, description, language and canonical link from a parsed
//! document. Every field has a defined default, so extraction cannot fail.

use dom_query::Document;

use crate::dom;
use crate::result::Meta;

/// Language reported when the root element declares none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Extract document metadata.
///
/// Resolution rules, each defaulted independently:
/// - title: text of `<title>`, else empty
/// - description: `content` of `<meta name="description">`, else empty
/// - language: `lang` of the root `<html>` element, else `"en"`
/// - canonical: `href` of `<link rel="canonical">`, else `None`
#[must_use]
pub fn extract_meta(doc: &Document) -> Meta {
    Meta {
        title: extract_title(doc),
        description: extract_description(doc),
        language: extract_language(doc),
        canonical: extract_canonical(doc),
    }
}

fn extract_title(doc: &Document) -> String {
    dom::document_query(doc, "title")
        .map(|title| dom::text_content(&title).trim().to_string())
        .unwrap_or_default()
}

fn extract_description(doc: &Document) -> String {
    dom::document_query_all(doc, "meta[name]")
        .into_iter()
        .find(|meta| {
            dom::get_attribute(meta, "name").is_some_and(|name| name.eq_ignore_ascii_case("description"))
        })
        .and_then(|meta| dom::get_attribute(&meta, "content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

fn extract_language(doc: &Document) -> String {
    dom::document_query(doc, "html")
        .and_then(|html| dom::get_attribute(&html, "lang"))
        .map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

// rel is a token list: rel="canonical nofollow" still names a canonical link.
fn extract_canonical(doc: &Document) -> Option<String> {
    dom::document_query_all(doc, "link[rel]")
        .into_iter()
        .find(|link| {
            dom::get_attribute(link, "rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("canonical"))
            })
        })
        .and_then(|link| dom::get_attribute(&link, "href"))
        .map(|href| href.trim().to_string())
}
