//! Dynamic Fetch Stage
//!
//! Drives one browser session end to end: navigate, run the scroll/click
//! interaction rounds, capture the rendered markup, close.
//!
//! Errors are split three ways:
//! - navigation failure or timeout is recorded as [`Phase::JsLoad`] and
//!   capture continues with whatever has rendered;
//! - click failures are a [`ClickOutcome::Failed`] value and are dropped;
//! - anything else (launch, scroll, content read, close) fails the stage.

use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::browser::{BrowserEngine, BrowserSession, ClickOutcome};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::result::{ErrorLog, Interactions, Phase};

/// Rendered markup and what it took to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicCapture {
    pub html: String,
    pub interactions: Interactions,
    /// Non-fatal failures recorded during capture.
    pub errors: Vec<ErrorLog>,
}

/// Run the dynamic stage against a fresh session from `engine`.
///
/// The session is closed on every path once launch succeeded. A capture
/// error takes precedence over a close error.
pub async fn run<E: BrowserEngine + ?Sized>(
    engine: &E,
    url: &str,
    options: &Options,
) -> Result<DynamicCapture> {
    info!(url, stage = "dynamic", "Launching browser session");
    let mut session = engine.launch().await?;

    let captured = drive(session.as_mut(), url, options).await;
    let closed = session.close().await;

    match (captured, closed) {
        (Ok(capture), Ok(())) => Ok(capture),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), closed) => {
            if let Err(close_err) = closed {
                warn!(url, error = %close_err, "Browser close failed after capture error");
            }
            Err(err)
        }
    }
}

async fn drive(
    session: &mut dyn BrowserSession,
    url: &str,
    options: &Options,
) -> Result<DynamicCapture> {
    let mut errors = Vec::new();
    let mut interactions = Interactions::for_page(url);

    match timeout(options.navigation_timeout, session.navigate(url)).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!(url, error = %err, "Navigation failed; capturing rendered markup anyway");
            errors.push(ErrorLog::new(Phase::JsLoad, format!("Error loading page: {err}")));
        }
        Err(_) => {
            let err = Error::Timeout {
                operation: "navigation",
                seconds: options.navigation_timeout.as_secs(),
            };
            warn!(url, error = %err, "Navigation timed out; capturing rendered markup anyway");
            errors.push(ErrorLog::new(err.phase(), err.to_string()));
        }
    }

    for round in 0..options.interaction_rounds {
        session.scroll_to_bottom().await?;
        sleep(options.settle_interval).await;
        interactions.scrolls += 1;

        match ClickOutcome::from(session.click_by_label(&options.load_more_labels).await) {
            ClickOutcome::Clicked(description) => {
                debug!(url, round, clicked = %description, "Clicked load-more control");
                interactions.clicks.push(description);
                sleep(options.settle_interval).await;
            }
            ClickOutcome::NotFound => {}
            ClickOutcome::Failed(reason) => {
                debug!(url, round, reason = %reason, "Load-more click failed; continuing");
            }
        }
    }

    let html = session.content().await?;
    info!(
        url,
        bytes = html.len(),
        scrolls = interactions.scrolls,
        clicks = interactions.clicks.len(),
        "Captured rendered page"
    );

    Ok(DynamicCapture {
        html,
        interactions,
        errors,
    })
}
