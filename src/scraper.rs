//! Fetch Orchestrator
//!
//! Sequences the static stage and, when needed, the dynamic stage, and
//! assembles exactly one [`ScrapeResult`] per call. Nothing escapes as an
//! error: failures are recorded in the result's error log.
//!
//! The flow is an explicit state machine:
//!
//! ```text
//! Start ──> StaticAttempted ──rich──────────────────────────> Done
//!                 │ thin (silent) / failed (static_fetch)
//!                 v
//!           DynamicPending ──> DynamicAttempted ──ok────────> Done
//!                                     └──failed (playwright_execution)
//!                                                  ──> Done (degraded)
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::extract::{self, PageExtract};
use crate::fetch::{dynamic_stage, static_stage};
use crate::fetch::{BrowserEngine, ChromiumEngine, DynamicCapture, HttpFetcher, PageFetcher, StaticOutcome};
use crate::options::Options;
use crate::result::{ErrorLog, Interactions, Phase, ScrapeResult};

enum FetchState {
    Start,
    StaticAttempted(StaticOutcome),
    DynamicPending,
    DynamicAttempted(Result<DynamicCapture>),
    Done(ScrapeResult),
}

/// Adaptive scraper: cheap static fetch first, rendered capture when the
/// static page is thin or unreachable.
///
/// Holds no per-scrape state; one instance can serve concurrent calls, each
/// of which gets its own browser session.
#[derive(Debug)]
pub struct Scraper<F = HttpFetcher, B = ChromiumEngine> {
    fetcher: F,
    browser: B,
    options: Options,
}

impl Scraper<HttpFetcher, ChromiumEngine> {
    /// Scraper with the `reqwest` transport and a headless Chromium engine.
    pub fn new(options: Options) -> Result<Self> {
        Ok(Self::with_parts(
            HttpFetcher::new(&options)?,
            ChromiumEngine::new(),
            options,
        ))
    }
}

impl<F: PageFetcher, B: BrowserEngine> Scraper<F, B> {
    /// Scraper over caller-provided transport and browser engine.
    pub fn with_parts(fetcher: F, browser: B, options: Options) -> Self {
        Self {
            fetcher,
            browser,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Scrape one URL. Always returns a result.
    pub async fn scrape(&self, url: &str) -> ScrapeResult {
        let scraped_at = Utc::now();
        let mut errors: Vec<ErrorLog> = Vec::new();
        let mut state = FetchState::Start;

        loop {
            state = match state {
                FetchState::Start => {
                    FetchState::StaticAttempted(static_stage::run(&self.fetcher, url, &self.options).await)
                }

                FetchState::StaticAttempted(StaticOutcome::Rich(page)) => {
                    info!(url, stage = "static", sections = page.sections.len(), "Accepted static page");
                    FetchState::Done(assemble(
                        url,
                        scraped_at,
                        page,
                        Interactions::for_page(url),
                        std::mem::take(&mut errors),
                    ))
                }

                FetchState::StaticAttempted(StaticOutcome::Thin { text_chars }) => {
                    debug!(
                        url,
                        text_chars,
                        threshold = self.options.richness_threshold,
                        "Static page too thin; falling back to browser"
                    );
                    FetchState::DynamicPending
                }

                FetchState::StaticAttempted(StaticOutcome::Failed(err)) => {
                    warn!(url, error = %err, "Static fetch failed; falling back to browser");
                    errors.push(ErrorLog::new(Phase::StaticFetch, err.to_string()));
                    FetchState::DynamicPending
                }

                FetchState::DynamicPending => {
                    FetchState::DynamicAttempted(dynamic_stage::run(&self.browser, url, &self.options).await)
                }

                FetchState::DynamicAttempted(Ok(capture)) => {
                    errors.extend(capture.errors);
                    let page = extract::extract_page(&capture.html, url, &self.options);
                    info!(url, stage = "dynamic", sections = page.sections.len(), "Accepted rendered page");
                    FetchState::Done(assemble(
                        url,
                        scraped_at,
                        page,
                        capture.interactions,
                        std::mem::take(&mut errors),
                    ))
                }

                FetchState::DynamicAttempted(Err(err)) => {
                    warn!(url, error = %err, "Browser capture failed; returning degraded result");
                    errors.push(ErrorLog::new(Phase::PlaywrightExecution, err.to_string()));
                    FetchState::Done(ScrapeResult::degraded(url, scraped_at, std::mem::take(&mut errors)))
                }

                FetchState::Done(result) => return result,
            };
        }
    }
}

fn assemble(
    url: &str,
    scraped_at: DateTime<Utc>,
    page: PageExtract,
    interactions: Interactions,
    errors: Vec<ErrorLog>,
) -> ScrapeResult {
    ScrapeResult {
        url: url.to_string(),
        scraped_at,
        meta: page.meta,
        sections: page.sections,
        interactions,
        errors,
    }
}
