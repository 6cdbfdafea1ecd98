//! HTTP service exposing the scraper.
//!
//! Routes:
//! - `POST /scrape` with `{ "url": "..." }` returns `{ "result": ScrapeResult }`.
//!   A URL without an HTTP(S) scheme is rejected with 400 before any fetch.
//! - `GET /healthz` returns `{ "status": "ok" }`.
//! - Everything else is served from the static asset directory when one is
//!   configured and exists.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::fetch::{BrowserEngine, PageFetcher};
use crate::result::ScrapeResult;
use crate::scraper::Scraper;
use crate::url_utils;

/// Invalid service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SCRAPER_PORT must be a port number, got `{0}`")]
    InvalidPort(String),
}

/// Service configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pre-built frontend assets, served only if the directory exists.
    pub static_dir: PathBuf,
    /// Browser binary override for the dynamic stage.
    pub chrome_bin: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("frontend/dist"),
            chrome_bin: None,
        }
    }
}

impl ServerConfig {
    /// Read `SCRAPER_HOST`, `SCRAPER_PORT`, `SCRAPER_STATIC_DIR` and
    /// `CHROME_BIN`, loading a `.env` file first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("SCRAPER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("SCRAPER_HOST").unwrap_or(defaults.host),
            port,
            static_dir: lookup("SCRAPER_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            chrome_bin: lookup("CHROME_BIN").map(PathBuf::from),
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub result: ScrapeResult,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: &'static str,
}

/// Build the service router around a shared scraper.
pub fn router<F, B>(scraper: Arc<Scraper<F, B>>, static_dir: Option<&Path>) -> Router
where
    F: PageFetcher + 'static,
    B: BrowserEngine + 'static,
{
    let mut app = Router::new()
        .route("/healthz", get(health))
        .route("/scrape", post(scrape_handler::<F, B>))
        .with_state(scraper);

    match static_dir {
        Some(dir) if dir.is_dir() => {
            info!(dir = %dir.display(), "Serving static assets");
            app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
        }
        Some(dir) => {
            info!(dir = %dir.display(), "Static asset directory not found; not serving assets");
        }
        None => {}
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn scrape_handler<F, B>(
    State(scraper): State<Arc<Scraper<F, B>>>,
    Json(request): Json<ScrapeRequest>,
) -> Response
where
    F: PageFetcher + 'static,
    B: BrowserEngine + 'static,
{
    if !url_utils::has_http_scheme(&request.url) {
        warn!(url = %request.url, "Rejected scrape request");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                detail: "Invalid URL scheme",
            }),
        )
            .into_response();
    }

    let result = scraper.scrape(request.url.trim()).await;
    Json(ScrapeResponse { result }).into_response()
}

/// Bind and serve until the process is stopped.
pub async fn serve<F, B>(scraper: Arc<Scraper<F, B>>, config: &ServerConfig) -> std::io::Result<()>
where
    F: PageFetcher + 'static,
    B: BrowserEngine + 'static,
{
    let app = router(scraper, Some(&config.static_dir));
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Scraper API listening on {addr}");

    axum::serve(listener, app).await
}
