//! Browser driver seam.
//!
//! The dynamic stage only needs a handful of operations from a browser:
//! launch an isolated session, navigate, scroll, click a control by label,
//! read the rendered markup, and close. Production code drives Chromium
//! ([`super::ChromiumEngine`]); tests script these traits directly.

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Launches isolated browser sessions. One session per scrape; nothing is
/// shared between sessions.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Start a fresh browser with one blank page open.
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// A live browser with a single page.
///
/// Callers must call [`BrowserSession::close`] on every path once
/// [`BrowserEngine::launch`] has succeeded.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate and wait until the document is DOM-ready (not fully loaded).
    /// Unbounded here; the caller applies the navigation timeout.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Scroll to the bottom of the document.
    async fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Click the first button whose text contains one of `labels`
    /// (case-insensitive). Returns the clicked button's text, or `None`
    /// when no button matched.
    async fn click_by_label(&mut self, labels: &[String]) -> Result<Option<String>>;

    /// Full rendered markup of the page.
    async fn content(&mut self) -> Result<String>;

    /// Close the page and the browser.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Result of the optional "load more" click. Failures are a value, not an
/// error: the interaction loop records clicks and ignores the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A control was clicked; holds its description for the interaction log.
    Clicked(String),
    /// No matching control on the page.
    NotFound,
    /// Locating or clicking failed.
    Failed(String),
}

impl From<Result<Option<String>>> for ClickOutcome {
    fn from(result: Result<Option<String>>) -> Self {
        match result {
            Ok(Some(text)) => Self::Clicked(describe_click(&text)),
            Ok(None) => Self::NotFound,
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

fn describe_click(text: &str) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        "Unlabelled button".to_string()
    } else {
        format!("{text} button")
    }
}

/// Engine for static-only operation: every launch fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledBrowser;

#[async_trait]
impl BrowserEngine for DisabledBrowser {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        Err(Error::Browser("browser stage disabled".to_string()))
    }
}
