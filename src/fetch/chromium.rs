//! Headless Chromium driver built on `chromiumoxide`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::browser::{BrowserEngine, BrowserSession};
use crate::error::{Error, Result};

/// Interval between `document.readyState` checks while navigating.
const READY_POLL: Duration = Duration::from_millis(100);

const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body ? document.body.scrollHeight : 0)";

/// Clicks the first matching button and returns its text, or `""` when
/// nothing matched. `null` is avoided because it does not survive
/// by-value evaluation.
const CLICK_SCRIPT: &str = r#"
(() => {
    const labels = __LABELS__;
    const buttons = Array.from(document.querySelectorAll('button'));
    const target = buttons.find((b) => {
        const text = (b.innerText || b.textContent || '').toLowerCase();
        return labels.some((label) => text.includes(label));
    });
    if (!target) return '';
    target.click();
    return (target.innerText || target.textContent || '').trim();
})()
"#;

/// Launches a new headless Chromium process per session.
#[derive(Debug, Clone, Default)]
pub struct ChromiumEngine {
    executable: Option<PathBuf>,
}

impl ChromiumEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific browser binary instead of auto-detection.
    #[must_use]
    pub fn with_executable(path: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(path.into()),
        }
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");
        if let Some(ref path) = self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(Error::Browser)?;

        let (mut browser, mut handler) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });
        info!(browser = "chromium", "Browser launched");

        match browser.new_page("about:blank").await {
            Ok(page) => Ok(Box::new(ChromiumSession {
                browser,
                page,
                handler,
            })),
            Err(err) => {
                // No session exists yet to close, so tear the process down here.
                if let Err(close_err) = browser.close().await {
                    debug!(error = %close_err, "Browser close after failed page open");
                }
                handler.abort();
                Err(err.into())
            }
        }
    }
}

struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    /// Returns once the new document is DOM-ready; subresources may still be
    /// loading. Runs until then, so callers bound it with a timeout.
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let response = self
            .page
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        if let Some(error_text) = response.result.error_text.as_deref().filter(|t| !t.is_empty()) {
            return Err(Error::Navigation(format!("{error_text} at {url}")));
        }

        loop {
            match self.page.evaluate("document.readyState").await {
                Ok(state) => {
                    if state.into_value::<String>().is_ok_and(|s| is_dom_ready(&s)) {
                        return Ok(());
                    }
                }
                // Execution context is swapped out while the document commits
                Err(err) => debug!(url, error = %err, "readyState not available yet"),
            }
            tokio::time::sleep(READY_POLL).await;
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.page.evaluate(SCROLL_SCRIPT).await?;
        Ok(())
    }

    async fn click_by_label(&mut self, labels: &[String]) -> Result<Option<String>> {
        let lowered: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
        let labels_json =
            serde_json::to_string(&lowered).map_err(|e| Error::Browser(e.to_string()))?;
        let script = CLICK_SCRIPT.replace("__LABELS__", &labels_json);

        let clicked: String = self
            .page
            .evaluate(script)
            .await?
            .into_value()
            .map_err(|e| Error::Browser(e.to_string()))?;

        Ok((!clicked.is_empty()).then_some(clicked))
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let Self {
            mut browser,
            page,
            handler,
        } = *self;

        if let Err(err) = page.close().await {
            debug!(error = %err, "Page close failed; closing browser anyway");
        }
        let closed = browser.close().await;
        if let Err(err) = browser.wait().await {
            debug!(error = %err, "Waiting for browser exit failed");
        }
        handler.abort();

        closed?;
        info!(browser = "chromium", "Browser closed");
        Ok(())
    }
}

/// `interactive` is reached at `DOMContentLoaded`, `complete` after `load`.
fn is_dom_ready(ready_state: &str) -> bool {
    matches!(ready_state, "interactive" | "complete")
}
