//! Scripted transport and browser fakes shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use universal_scraper::{BrowserEngine, BrowserSession, Error, Options, PageFetcher, Result};

/// Options with no settle waits so browser tests run instantly.
pub fn fast_options() -> Options {
    Options {
        settle_interval: Duration::ZERO,
        navigation_timeout: Duration::from_millis(200),
        ..Options::default()
    }
}

pub const FILLER: &str = "This paragraph has more than enough characters to clear the density filter.";

/// A page whose body text is well above the richness threshold.
pub fn rich_page() -> String {
    let paragraphs: String = (0..8).map(|i| format!("<p>Paragraph {i}. {FILLER}</p>")).collect();
    format!(
        r#"<html lang="en"><head><title>Rich page</title></head>
        <body><main><h1>Rich content</h1>{paragraphs}</main></body></html>"#
    )
}

/// Static transport returning a fixed body or a fixed failure.
pub struct FakeFetcher {
    response: std::result::Result<String, u16>,
    pub calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn ok(html: impl Into<String>) -> Self {
        Self {
            response: Ok(html.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            response: Err(status),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(html) => Ok(html.clone()),
            Err(status) => Err(Error::Status {
                status: *status,
                url: url.to_string(),
            }),
        }
    }
}

/// How the scripted page behaves.
#[derive(Clone, Default)]
pub struct PageScript {
    /// Markup before any "load more" click.
    pub initial_html: String,
    /// Markup after the load-more button was clicked, if the page has one.
    pub after_click_html: Option<String>,
    /// Navigation never completes.
    pub hang_navigation: bool,
    /// Navigation fails outright.
    pub fail_navigation: bool,
    /// Every click attempt errors.
    pub fail_clicks: bool,
    /// Reading rendered markup errors.
    pub fail_content: bool,
}

/// Observable side effects across all sessions of one engine.
#[derive(Default)]
pub struct BrowserLog {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub scrolls: AtomicUsize,
    pub navigations: Mutex<Vec<String>>,
}

/// Browser engine that plays a [`PageScript`].
pub struct ScriptedBrowser {
    script: PageScript,
    fail_launch: bool,
    pub log: Arc<BrowserLog>,
}

impl ScriptedBrowser {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            fail_launch: false,
            log: Arc::new(BrowserLog::default()),
        }
    }

    pub fn failing_launch() -> Self {
        Self {
            script: PageScript::default(),
            fail_launch: true,
            log: Arc::new(BrowserLog::default()),
        }
    }

    pub fn launches(&self) -> usize {
        self.log.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.log.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserEngine for ScriptedBrowser {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        if self.fail_launch {
            return Err(Error::Browser("executable not found".to_string()));
        }
        self.log.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            script: self.script.clone(),
            log: Arc::clone(&self.log),
            clicked: false,
        }))
    }
}

struct ScriptedSession {
    script: PageScript,
    log: Arc<BrowserLog>,
    clicked: bool,
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        if let Ok(mut navigations) = self.log.navigations.lock() {
            navigations.push(url.to_string());
        }
        if self.script.hang_navigation {
            std::future::pending::<()>().await;
        }
        if self.script.fail_navigation {
            return Err(Error::Navigation("net::ERR_NAME_NOT_RESOLVED".to_string()));
        }
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.log.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn click_by_label(&mut self, labels: &[String]) -> Result<Option<String>> {
        if self.script.fail_clicks {
            return Err(Error::Browser("element is detached".to_string()));
        }
        let has_button = self.script.after_click_html.is_some() && !self.clicked;
        if has_button && labels.iter().any(|l| "load more".contains(&l.to_lowercase())) {
            self.clicked = true;
            return Ok(Some("Load more".to_string()));
        }
        Ok(None)
    }

    async fn content(&mut self) -> Result<String> {
        if self.script.fail_content {
            return Err(Error::Browser("target closed".to_string()));
        }
        match (&self.script.after_click_html, self.clicked) {
            (Some(after), true) => Ok(after.clone()),
            _ => Ok(self.script.initial_html.clone()),
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.log.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
