//! Request and response bodies for `POST /scrape`.

use serde::{Deserialize, Serialize};

use crate::error::{PagelensError, Result, MISSING_URL_MESSAGE};
use crate::types::ExtractedItem;

/// Incoming scrape request.
///
/// `url` is kept as a raw JSON value so that presence and string-type are
/// checked explicitly instead of through deserialization failure or falsy
/// coercion.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<serde_json::Value>,
}

impl ScrapeRequest {
    /// The validated target address.
    ///
    /// Absent, `null`, non-string, and empty-string values all fail with the
    /// fixed validation message; no browser is launched for them.
    pub fn target_url(&self) -> Result<String> {
        match &self.url {
            Some(serde_json::Value::String(url)) if !url.is_empty() => Ok(url.clone()),
            _ => Err(PagelensError::validation(MISSING_URL_MESSAGE)),
        }
    }
}

/// Successful scrape response: the original address plus the extracted items
/// in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub url: String,
    pub data: Vec<ExtractedItem>,
}
