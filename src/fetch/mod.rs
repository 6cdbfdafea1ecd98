//! Fetch stages.
//!
//! - [`static_stage`]: one HTTP GET plus the richness check.
//! - [`dynamic_stage`]: a headless browser session with scroll/click
//!   interaction simulation.
//! - [`browser`]: the driver seam the dynamic stage runs against, with the
//!   Chromium implementation in [`chromium`].

pub mod browser;
pub mod chromium;
pub mod dynamic_stage;
pub mod static_stage;

pub use browser::{BrowserEngine, BrowserSession, ClickOutcome, DisabledBrowser};
pub use chromium::ChromiumEngine;
pub use dynamic_stage::DynamicCapture;
pub use static_stage::{HttpFetcher, PageFetcher, StaticOutcome};
