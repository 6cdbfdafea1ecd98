//! Error types for universal-scraper.
//!
//! Stage errors never escape [`crate::Scraper::scrape`]; the orchestrator turns
//! them into [`crate::ErrorLog`] entries tagged with the phase they occurred in.

use crate::result::Phase;

/// Error type for fetch and capture operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL could not be parsed or does not use an HTTP(S) scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport failure (connection, TLS, redirect loop, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP status {status} for {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Final URL after redirects.
        url: String,
    },

    /// Browser session failure (launch, script evaluation, content read, close).
    #[error("Browser error: {0}")]
    Browser(String),

    /// Page navigation failed inside a live browser session.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A time-bounded operation ran past its budget.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// What was being waited on.
        operation: &'static str,
        /// Budget that was exceeded.
        seconds: u64,
    },
}

impl Error {
    /// Phase tag this error is recorded under when it ends a stage.
    ///
    /// Navigation failures and navigation timeouts belong to the rendered-load
    /// phase; everything else that happens inside a browser session is a
    /// session failure.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::InvalidUrl(_) | Self::Transport(_) | Self::Status { .. } => Phase::StaticFetch,
            Self::Navigation(_)
            | Self::Timeout {
                operation: "navigation",
                ..
            } => Phase::JsLoad,
            Self::Browser(_) | Self::Timeout { .. } => Phase::PlaywrightExecution,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
                url: err.url().map(ToString::to_string).unwrap_or_default(),
            };
        }
        Self::Transport(err.to_string())
    }
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Browser(err.to_string())
    }
}

/// Result type alias for fetch and capture operations.
pub type Result<T> = std::result::Result<T, Error>;
