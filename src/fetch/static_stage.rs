//! Static Fetch Stage
//!
//! One GET with redirect-following and a hard timeout, followed by the
//! richness check that decides whether browser rendering can be skipped.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use tracing::{debug, info};

use crate::dom;
use crate::encoding;
use crate::error::{Error, Result};
use crate::extract::{self, PageExtract};
use crate::options::Options;
use crate::url_utils;

/// HTTP transport for the static stage.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the markup at `url`. Fails on transport errors, timeouts and
    /// non-2xx responses.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] over a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the timeout, redirect limit and user agent from
    /// `options`.
    pub fn new(options: &Options) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.static_timeout)
            .redirect(Policy::limited(options.max_redirects))
            .user_agent(options.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = url_utils::parse_http_url(url)?;

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let final_url = resp.url().to_string();
        let body = resp.bytes().await?;

        info!(url = %final_url, bytes = body.len(), "Fetched static page");
        Ok(encoding::decode_body(&body, content_type.as_deref()))
    }
}

/// Outcome of the static stage.
#[derive(Debug)]
pub enum StaticOutcome {
    /// Enough text: the page was extracted and the browser stage is skipped.
    Rich(PageExtract),
    /// Fetched fine but too little text; the browser stage should run.
    Thin {
        /// Measured body text length in characters.
        text_chars: usize,
    },
    /// Transport or HTTP failure.
    Failed(Error),
}

/// Run the static stage: fetch, then apply the richness check.
pub async fn run<F: PageFetcher + ?Sized>(fetcher: &F, url: &str, options: &Options) -> StaticOutcome {
    info!(url, stage = "static", "Fetching page");
    match fetcher.fetch(url).await {
        Ok(html) => assess(&html, url, options),
        Err(err) => StaticOutcome::Failed(err),
    }
}

/// Richness check. A page whose body text is longer than
/// `options.richness_threshold` characters is extracted right away.
#[must_use]
pub fn assess(html: &str, url: &str, options: &Options) -> StaticOutcome {
    let doc = dom::parse(html);
    let text_chars = extract::plain_text_len(&doc);

    if text_chars > options.richness_threshold {
        debug!(url, text_chars, "Static page is rich enough");
        StaticOutcome::Rich(extract::extract_document(&doc, url, options))
    } else {
        StaticOutcome::Thin { text_chars }
    }
}
