//! Scrape one URL and print the result as JSON on stdout.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use universal_scraper::{
    url_utils, ChromiumEngine, DisabledBrowser, HttpFetcher, Options, ScrapeResult, Scraper,
};

#[derive(Debug, Parser)]
#[command(name = "scrape-url", about = "Extract structured sections from a web page")]
struct Args {
    /// Page to scrape (http or https)
    url: String,

    /// Never launch a browser; thin or failed static fetches yield a degraded result
    #[arg(long)]
    static_only: bool,

    /// Browser binary to use for rendered capture
    #[arg(long, env = "CHROME_BIN")]
    chrome_bin: Option<PathBuf>,

    /// Body text length above which the static page is accepted
    #[arg(long, default_value_t = 500)]
    richness_threshold: usize,

    /// Settle wait after each scroll and click, in milliseconds
    #[arg(long, default_value_t = 1000)]
    settle_ms: u64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("universal_scraper=info".parse()?),
        )
        .init();

    let args = Args::parse();
    url_utils::parse_http_url(&args.url)?;

    let options = Options {
        richness_threshold: args.richness_threshold,
        settle_interval: Duration::from_millis(args.settle_ms),
        ..Options::default()
    };
    let fetcher = HttpFetcher::new(&options)?;

    let result: ScrapeResult = if args.static_only {
        Scraper::with_parts(fetcher, DisabledBrowser, options)
            .scrape(&args.url)
            .await
    } else {
        let browser = args
            .chrome_bin
            .map_or_else(ChromiumEngine::new, ChromiumEngine::with_executable);
        Scraper::with_parts(fetcher, browser, options)
            .scrape(&args.url)
            .await
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}
