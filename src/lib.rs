//! # universal-scraper
//!
//! Adaptive structured extraction from a single web page.
//!
//! A scrape fetches the page over plain HTTP first. If that fails, or the
//! page carries too little text to be worth analysing, it falls back to a
//! headless browser that renders the page, scrolls, and clicks "load more"
//! style controls. The resulting markup is segmented into a small, bounded
//! set of structured [`Section`]s with headings, text, links, images, lists
//! and tables, plus page [`Meta`]data.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use universal_scraper::{Options, Scraper};
//!
//! # async fn run() -> universal_scraper::Result<()> {
//! let scraper = Scraper::new(Options::default())?;
//! let result = scraper.scrape("https://example.com").await;
//!
//! println!("Title: {}", result.meta.title);
//! for section in &result.sections {
//!     println!("[{}] {}", section.kind, section.label);
//! }
//! for error in &result.errors {
//!     eprintln!("{}: {}", error.phase, error.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Markup you already have can be segmented without any network access:
//!
//! ```rust
//! use universal_scraper::extract_html;
//!
//! let html = r#"<html><head><title>Shop</title></head><body>
//!     <section><h2>Opening hours</h2><p>Monday to Friday, nine to five, closed on public holidays.</p></section>
//! </body></html>"#;
//!
//! let page = extract_html(html, "https://shop.example/");
//! assert_eq!(page.meta.title, "Shop");
//! assert_eq!(page.sections[0].label, "Opening hours");
//! ```
//!
//! ## Guarantees
//!
//! - [`Scraper::scrape`] never fails; problems show up in
//!   [`ScrapeResult::errors`] tagged with a [`Phase`].
//! - Every result has between 1 and `max_sections` sections, except a fully
//!   failed scrape, which has none and placeholder metadata.
//! - Section content is bounded by the caps in [`Options`].

mod error;
mod extract;
mod options;
mod result;
mod scraper;

/// Markup query facade over `dom_query`.
pub mod dom;

/// Document metadata (title, description, language, canonical).
pub mod metadata;

/// Content segmentation engine: noise filtering, sectioning, bounding.
pub mod segment;

/// Static and dynamic fetch stages and the browser driver seam.
pub mod fetch;

/// URL validation and resolution.
pub mod url_utils;

/// Response body charset detection and decoding.
pub mod encoding;

/// HTTP service exposing the scraper.
#[cfg(feature = "server")]
pub mod server;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{extract_document, extract_page, plain_text_len, PageExtract};
pub use fetch::{BrowserEngine, BrowserSession, ChromiumEngine, DisabledBrowser, HttpFetcher, PageFetcher};
pub use options::Options;
pub use result::{
    ErrorLog, Image, Interactions, Link, Meta, Phase, ScrapeResult, Section, SectionContent,
    SectionType, Table,
};
pub use scraper::Scraper;

/// Scrape a URL with default options, the `reqwest` transport and headless
/// Chromium.
///
/// Like [`Scraper::scrape`], this always returns a result. If the HTTP client
/// cannot even be built, the result is degraded and carries that error.
pub async fn scrape(url: &str) -> ScrapeResult {
    match Scraper::new(Options::default()) {
        Ok(scraper) => scraper.scrape(url).await,
        Err(err) => ScrapeResult::degraded(
            url,
            chrono::Utc::now(),
            vec![ErrorLog::new(err.phase(), err.to_string())],
        ),
    }
}

/// Extract metadata and sections from markup using default options.
///
/// `source_url` is used to resolve relative links and images and is
/// recorded on every section.
#[must_use]
pub fn extract_html(html: &str, source_url: &str) -> PageExtract {
    extract::extract_page(html, source_url, &Options::default())
}

/// Extract metadata and sections from markup with custom options.
#[must_use]
pub fn extract_html_with_options(html: &str, source_url: &str, options: &Options) -> PageExtract {
    extract::extract_page(html, source_url, options)
}
