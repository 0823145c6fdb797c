//! Browser automation module for headless page extraction.
//!
//! This module renders a URL in a headless browser (Playwright via Node.js)
//! and extracts headings, paragraphs, and tables from the rendered document.
//!
//! # Module Structure
//!
//! - [`session`] - Per-request browser session lifecycle
//! - [`playwright`] - The inline extraction script and availability checks
//! - [`extract`] - Script-output conversion into extracted items
//!
//! # Example
//!
//! ```no_run
//! use pagelens_lib::browser::{render_and_extract, BrowserOptions};
//!
//! # async fn example() -> pagelens_lib::Result<()> {
//! let items = render_and_extract("https://example.com", &BrowserOptions::default()).await?;
//! println!("extracted {} items", items.len());
//! # Ok(())
//! # }
//! ```

mod extract;
mod playwright;
mod session;

pub use session::{
    render_and_extract, BrowserOptions, DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_PROCESS_TIMEOUT,
};
