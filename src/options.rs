//! Configuration options for the scrape pipeline.
//!
//! The `Options` struct holds every threshold, cap and timeout the pipeline
//! uses. Defaults reproduce the reference behaviour.

use std::time::Duration;

/// Default `User-Agent` sent by the static fetch stage.
pub const DEFAULT_USER_AGENT: &str = concat!("universal-scraper/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the scrape pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use universal_scraper::Options;
///
/// let options = Options {
///     richness_threshold: 1_000,
///     settle_interval: Duration::from_millis(250),
///     ..Options::default()
/// };
/// assert_eq!(options.max_sections, 16);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    // === Richness check ===
    /// A static page is accepted when its body text is longer than this
    /// many characters. Otherwise the browser stage runs.
    ///
    /// Default: `500`
    pub richness_threshold: usize,

    // === Segmentation ===
    /// Candidates with less normalized text than this are layout wrappers
    /// and are skipped.
    ///
    /// Default: `50`
    pub min_section_text: usize,

    /// Maximum number of sections per result.
    ///
    /// Default: `16`
    pub max_sections: usize,

    /// Maximum characters of section text.
    ///
    /// Default: `1000`
    pub max_text_chars: usize,

    /// Default: `10`
    pub max_links: usize,

    /// Default: `5`
    pub max_images: usize,

    /// Default: `5`
    pub max_lists: usize,

    /// Default: `3`
    pub max_tables: usize,

    /// Maximum characters of serialized markup kept per section.
    ///
    /// Default: `500`
    pub max_raw_html_chars: usize,

    /// Characters of body text kept in the fallback section.
    ///
    /// Default: `500`
    pub fallback_text_chars: usize,

    /// Characters of body markup kept in the fallback section.
    ///
    /// Default: `200`
    pub fallback_raw_html_chars: usize,

    // === Static fetch ===
    /// Hard timeout for the whole static request, body included.
    ///
    /// Default: 10 seconds
    pub static_timeout: Duration,

    /// Redirects followed before the request fails.
    ///
    /// Default: `10`
    pub max_redirects: usize,

    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    // === Rendered capture ===
    /// Navigation timeout. Expiry is logged and capture continues.
    ///
    /// Default: 15 seconds
    pub navigation_timeout: Duration,

    /// Pause after each scroll and each click for lazy content to settle.
    ///
    /// Default: 1 second
    pub settle_interval: Duration,

    /// Number of scroll/click rounds.
    ///
    /// Default: `3`
    pub interaction_rounds: u32,

    /// Button labels that reveal more content, matched case-insensitively
    /// as substrings of the button text.
    ///
    /// Default: `["load more", "show more"]`
    pub load_more_labels: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            richness_threshold: 500,
            min_section_text: 50,
            max_sections: 16,
            max_text_chars: 1000,
            max_links: 10,
            max_images: 5,
            max_lists: 5,
            max_tables: 3,
            max_raw_html_chars: 500,
            fallback_text_chars: 500,
            fallback_raw_html_chars: 200,
            static_timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            navigation_timeout: Duration::from_secs(15),
            settle_interval: Duration::from_secs(1),
            interaction_rounds: 3,
            load_more_labels: vec!["load more".to_string(), "show more".to_string()],
        }
    }
}
