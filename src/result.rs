//! Result types for scrape output.
//!
//! Every value here is built once by the pipeline and returned; nothing is
//! mutated after it lands in a [`ScrapeResult`]. Field names serialize in
//! camelCase (`scrapedAt`, `sourceUrl`, `rawHtml`).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A table as rows of cell texts.
pub type Table = Vec<Vec<String>>;

/// The single output unit of a scrape.
///
/// Always produced, even when every stage failed; failures are visible only
/// through [`ScrapeResult::errors`] and, at worst, [`Meta::placeholder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    /// The requested URL.
    pub url: String,

    /// Capture time, recorded once when the scrape started.
    pub scraped_at: DateTime<Utc>,

    /// Document metadata from the accepted fetch attempt.
    pub meta: Meta,

    /// Structured sections in document order.
    pub sections: Vec<Section>,

    /// What the browser stage did to the page.
    pub interactions: Interactions,

    /// Failures recorded along the way, in the order they happened.
    pub errors: Vec<ErrorLog>,
}

impl ScrapeResult {
    /// Result for a scrape where no markup could be captured at all.
    #[must_use]
    pub fn degraded(url: &str, scraped_at: DateTime<Utc>, errors: Vec<ErrorLog>) -> Self {
        Self {
            url: url.to_string(),
            scraped_at,
            meta: Meta::placeholder(),
            sections: Vec::new(),
            interactions: Interactions::for_page(url),
            errors,
        }
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Contents of `<title>`, or empty.
    pub title: String,

    /// `<meta name="description">` content, or empty.
    pub description: String,

    /// Root element `lang`, defaulting to `"en"`.
    pub language: String,

    /// `<link rel="canonical">` href, absent when the page declares none.
    pub canonical: Option<String>,
}

impl Meta {
    /// Metadata reported when the whole pipeline failed.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            title: "Error".to_string(),
            description: String::new(),
            language: "en".to_string(),
            canonical: None,
        }
    }
}

/// Structural role assigned to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Section,
    Nav,
    Footer,
    Hero,
    /// Only used by the synthesized fallback section.
    Unknown,
}

impl SectionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Nav => "nav",
            Self::Footer => "footer",
            Self::Hero => "hero",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural unit of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// `sec-N` for segmented sections, `fallback-0` for the synthesized one.
    pub id: String,

    #[serde(rename = "type")]
    pub kind: SectionType,

    /// First heading, or the opening words of the section text.
    pub label: String,

    /// Page the section came from.
    pub source_url: String,

    pub content: SectionContent,

    /// Serialized markup of the element, cut to a bounded prefix.
    pub raw_html: String,

    /// Set when `raw_html` is shorter than the element's full markup.
    pub truncated: bool,
}

/// Extracted content of a section. Every list is capped by [`crate::Options`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionContent {
    pub headings: Vec<String>,
    pub text: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub lists: Vec<Vec<String>>,
    pub tables: Vec<Table>,
}

/// An anchor with visible text and an absolute target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image with an absolute source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    /// Empty when the element has no `alt`.
    pub alt: String,
}

/// Record of simulated user behaviour during rendered capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactions {
    /// Descriptions of clicked controls, in click order.
    pub clicks: Vec<String>,

    /// Scroll steps performed.
    pub scrolls: u32,

    /// Pages visited. Currently always the single requested URL.
    pub pages: Vec<String>,
}

impl Interactions {
    /// An empty record for a single-page capture.
    #[must_use]
    pub fn for_page(url: &str) -> Self {
        Self {
            clicks: Vec::new(),
            scrolls: 0,
            pages: vec![url.to_string()],
        }
    }
}

/// Pipeline point at which a failure was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Static HTTP fetch failed.
    StaticFetch,
    /// Browser navigation failed or timed out (non-fatal).
    JsLoad,
    /// The browser session itself failed.
    PlaywrightExecution,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StaticFetch => "static_fetch",
            Self::JsLoad => "js_load",
            Self::PlaywrightExecution => "playwright_execution",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLog {
    pub message: String,
    pub phase: Phase,
}

impl ErrorLog {
    #[must_use]
    pub fn new(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            phase,
        }
    }
}
