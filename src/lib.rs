//! Pagelens Library
//!
//! An HTTP service that renders a page in a headless browser and returns a
//! structured extraction of its headings, paragraphs, and tables. The whole
//! service is one request handler: validate the target address, run a
//! request-scoped browser session, extract, tear down, respond.
//!
//! # Module Overview
//!
//! - [`browser`] - Headless browser sessions and the extraction script
//! - [`server`] - axum router and the `POST /scrape` handler
//! - [`config`] - Environment-resolved runtime configuration
//! - [`types`] - Wire types (requests, responses, extracted items)
//! - [`error`] - Error taxonomy and HTTP status mapping
//!
//! # Example
//!
//! ```no_run
//! use pagelens_lib::browser::{render_and_extract, BrowserOptions};
//!
//! # async fn example() -> pagelens_lib::Result<()> {
//! let items = render_and_extract("https://example.com", &BrowserOptions::default()).await?;
//! for item in &items {
//!     println!("{}", serde_json::to_string(item)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod server;
pub mod types;
pub mod viewport;

pub use browser::{
    render_and_extract, BrowserOptions, DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_PROCESS_TIMEOUT,
};
pub use config::{Config, DEFAULT_PORT};
pub use error::{PagelensError, Result, MISSING_URL_MESSAGE};
pub use server::{router, serve, AppState};
pub use types::{ExtractedItem, ScrapeRequest, ScrapeResponse};
pub use viewport::Viewport;
