//! Per-section content extraction.
//!
//! Each extractor walks the candidate's descendants in document order and
//! stops once its cap is reached.

use dom_query::Selection;
use url::Url;

use crate::dom;
use crate::options::Options;
use crate::result::{Image, Link, SectionContent, Table};
use crate::url_utils;

/// Words of section text used for a label when there is no heading.
const LABEL_WORDS: usize = 5;

/// Suffix marking a label built from truncated text.
const LABEL_ELLIPSIS: &str = "...";

/// Extract bounded content from a candidate element.
///
/// `text` is the element's already-normalized text; it is cut to
/// `options.max_text_chars` here.
#[must_use]
pub fn extract_section_content(
    el: &Selection,
    text: &str,
    base: Option<&Url>,
    options: &Options,
) -> SectionContent {
    SectionContent {
        headings: extract_headings(el),
        text: dom::truncate_chars(text, options.max_text_chars).to_string(),
        links: extract_links(el, base, options.max_links),
        images: extract_images(el, base, options.max_images),
        lists: extract_lists(el, options.max_lists),
        tables: extract_tables(el, options.max_tables),
    }
}

/// Text of every `h1`-`h3` descendant. Empty headings are skipped.
#[must_use]
pub fn extract_headings(el: &Selection) -> Vec<String> {
    dom::query_all(el, "h1, h2, h3")
        .iter()
        .map(dom::inline_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Anchors with a non-empty `href` and visible text.
#[must_use]
pub fn extract_links(el: &Selection, base: Option<&Url>, max: usize) -> Vec<Link> {
    dom::query_all(el, "a[href]")
        .iter()
        .filter_map(|a| {
            let href = dom::get_attribute(a, "href")?;
            if href.trim().is_empty() {
                return None;
            }
            let text = dom::inline_text(a);
            if text.is_empty() {
                return None;
            }
            Some(Link {
                text,
                href: url_utils::resolve(&href, base),
            })
        })
        .take(max)
        .collect()
}

/// Images with a non-empty `src`.
#[must_use]
pub fn extract_images(el: &Selection, base: Option<&Url>, max: usize) -> Vec<Image> {
    dom::query_all(el, "img[src]")
        .iter()
        .filter_map(|img| {
            let src = dom::get_attribute(img, "src")?;
            if src.trim().is_empty() {
                return None;
            }
            Some(Image {
                src: url_utils::resolve(&src, base),
                alt: dom::get_attribute(img, "alt").unwrap_or_default(),
            })
        })
        .take(max)
        .collect()
}

/// Item texts of each `ul`/`ol` descendant. Lists without a non-empty item
/// do not count toward the cap.
#[must_use]
pub fn extract_lists(el: &Selection, max: usize) -> Vec<Vec<String>> {
    dom::query_all(el, "ul, ol")
        .iter()
        .map(|list| {
            dom::query_all(list, "li")
                .iter()
                .map(dom::inline_text)
                .filter(|item| !item.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|items| !items.is_empty())
        .take(max)
        .collect()
}

/// Rows of non-empty `th`/`td` texts for each table descendant. Empty rows
/// are dropped; a table left with no rows does not count toward the cap.
#[must_use]
pub fn extract_tables(el: &Selection, max: usize) -> Vec<Table> {
    dom::query_all(el, "table")
        .iter()
        .map(|table| {
            dom::query_all(table, "tr")
                .iter()
                .map(|row| {
                    dom::query_all(row, "th, td")
                        .iter()
                        .map(dom::inline_text)
                        .filter(|cell| !cell.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|cells| !cells.is_empty())
                .collect::<Table>()
        })
        .filter(|rows| !rows.is_empty())
        .take(max)
        .collect()
}

/// Section label: the first heading, else the opening words of the text
/// followed by an ellipsis.
#[must_use]
pub fn derive_label(headings: &[String], text: &str) -> String {
    if let Some(first) = headings.first() {
        return first.clone();
    }
    let words: Vec<&str> = text.split_whitespace().take(LABEL_WORDS).collect();
    format!("{}{LABEL_ELLIPSIS}", words.join(" "))
}
