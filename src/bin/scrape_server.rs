//! HTTP service: `POST /scrape`, `GET /healthz`, optional static assets.
//!
//! Configured through `SCRAPER_HOST`, `SCRAPER_PORT`, `SCRAPER_STATIC_DIR`
//! and `CHROME_BIN` (a `.env` file is honoured).

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use universal_scraper::server::{self, ServerConfig};
use universal_scraper::{ChromiumEngine, HttpFetcher, Options, Scraper};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("universal_scraper=info".parse()?),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let options = Options::default();

    let browser = match config.chrome_bin {
        Some(ref path) => ChromiumEngine::with_executable(path),
        None => ChromiumEngine::new(),
    };
    let scraper = Scraper::with_parts(HttpFetcher::new(&options)?, browser, options);

    server::serve(Arc::new(scraper), &config).await?;
    Ok(())
}
