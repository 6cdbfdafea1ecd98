//! Fallback section for pages where no candidate qualifies.

use dom_query::Document;

use crate::dom;
use crate::options::Options;
use crate::result::{Section, SectionContent, SectionType};

pub const FALLBACK_ID: &str = "fallback-0";
pub const FALLBACK_LABEL: &str = "Main Content";

/// Synthesize the single section returned when segmentation yields nothing.
///
/// Text and markup come from `<body>`, cut to the fallback caps. The section
/// is always flagged truncated.
#[must_use]
pub fn fallback_section(doc: &Document, source_url: &str, options: &Options) -> Section {
    let (text, raw_html) = dom::document_query(doc, "body")
        .map(|body| {
            let text = dom::normalized_text(&body);
            let html = dom::outer_html(&body);
            (
                dom::truncate_chars(&text, options.fallback_text_chars).to_string(),
                dom::truncate_chars(&html, options.fallback_raw_html_chars).to_string(),
            )
        })
        .unwrap_or_default();

    Section {
        id: FALLBACK_ID.to_string(),
        kind: SectionType::Unknown,
        label: FALLBACK_LABEL.to_string(),
        source_url: source_url.to_string(),
        content: SectionContent {
            text,
            ..SectionContent::default()
        },
        raw_html,
        truncated: true,
    }
}
