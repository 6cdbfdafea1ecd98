//! Content Segmentation Engine
//!
//! Turns a parsed page into a small, ordered, size-bounded set of
//! [`Section`]s:
//!
//! 1. Candidates are every `section`, `header`, `footer`, `main` and `div`
//!    element, in document order.
//! 2. Candidates matching a [noise rule](rules::NOISE_RULES) are skipped.
//! 3. Candidates with less normalized text than `min_section_text` are
//!    skipped as layout wrappers.
//! 4. Survivors get headings, links, images, lists and tables extracted,
//!    a label, a [type](rules::TYPE_RULES) and a bounded markup snippet.
//! 5. The walk stops at `max_sections`, so outer elements win over nested
//!    ones when the cap is hit.
//!
//! When nothing survives, a single [fallback](fallback::fallback_section)
//! section is returned; the result is never empty.

pub mod content;
pub mod fallback;
pub mod rules;

use dom_query::{Document, Selection};
use tracing::debug;
use url::Url;

use crate::dom;
use crate::options::Options;
use crate::result::Section;

pub use fallback::{fallback_section, FALLBACK_ID};
pub use rules::{classify, is_noise, Rule};

/// Structural tags considered as section candidates.
pub const CANDIDATE_SELECTOR: &str = "section, header, footer, main, div";

/// Segment a parsed document into sections.
///
/// Returns between 1 and `max(options.max_sections, 1)` sections with ids
/// `sec-0`, `sec-1`, ... in document order, or the single fallback section.
#[must_use]
pub fn segment_document(doc: &Document, source_url: &str, options: &Options) -> Vec<Section> {
    let base = Url::parse(source_url).ok();
    let candidates = dom::document_query_all(doc, CANDIDATE_SELECTOR);
    let mut sections = Vec::new();

    for candidate in &candidates {
        if sections.len() >= options.max_sections {
            break;
        }
        if is_noise(candidate) {
            continue;
        }

        let text = dom::normalized_text(candidate);
        if text.chars().count() < options.min_section_text {
            continue;
        }

        let id = format!("sec-{}", sections.len());
        sections.push(build_section(id, candidate, &text, source_url, base.as_ref(), options));
    }

    debug!(
        url = source_url,
        candidates = candidates.len(),
        sections = sections.len(),
        "Segmented document"
    );

    if sections.is_empty() {
        sections.push(fallback_section(doc, source_url, options));
    }

    sections
}

fn build_section(
    id: String,
    el: &Selection,
    text: &str,
    source_url: &str,
    base: Option<&Url>,
    options: &Options,
) -> Section {
    let content = content::extract_section_content(el, text, base, options);
    let label = content::derive_label(&content.headings, text);

    let markup = dom::outer_html(el);
    let raw_html = dom::truncate_chars(&markup, options.max_raw_html_chars);
    let truncated = raw_html.len() < markup.len();

    Section {
        id,
        kind: classify(el),
        label,
        source_url: source_url.to_string(),
        content,
        raw_html: raw_html.to_string(),
        truncated,
    }
}
