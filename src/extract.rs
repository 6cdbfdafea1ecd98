//! Page extraction: metadata plus segmented sections from one markup string.
//!
//! The parsed tree lives only inside these synchronous functions, so async
//! callers never hold it across an `.await`.

use dom_query::Document;

use crate::dom;
use crate::metadata;
use crate::options::Options;
use crate::result::{Meta, Section};
use crate::segment;

/// Metadata and sections derived from one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtract {
    pub meta: Meta,
    pub sections: Vec<Section>,
}

/// Parse markup and extract metadata and sections.
#[must_use]
pub fn extract_page(html: &str, source_url: &str, options: &Options) -> PageExtract {
    let doc = dom::parse(html);
    extract_document(&doc, source_url, options)
}

/// Extract metadata and sections from an already parsed document.
#[must_use]
pub fn extract_document(doc: &Document, source_url: &str, options: &Options) -> PageExtract {
    PageExtract {
        meta: metadata::extract_meta(doc),
        sections: segment::segment_document(doc, source_url, options),
    }
}

/// Length in characters of the page's normalized body text, the measure
/// used by the richness check. Falls back to the whole document when there
/// is no `<body>`.
#[must_use]
pub fn plain_text_len(doc: &Document) -> usize {
    let text = match dom::document_query(doc, "body") {
        Some(body) => dom::normalized_text(&body),
        None => dom::normalized_text(&doc.select("html")),
    };
    text.chars().count()
}
