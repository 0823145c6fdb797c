//! Structured items extracted from a rendered document.

use serde::{Deserialize, Serialize};

/// One extracted element, in document order.
///
/// The serde form is the wire format: headings and paragraphs serialize as
/// `{"tag": "h1", "content": "trimmed text"}`, tables as
/// `{"tag": "table", "content": [[cell, ...], ...]}` with rows and cells in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "content", rename_all = "lowercase")]
pub enum ExtractedItem {
    H1(String),
    H2(String),
    H3(String),
    P(String),
    Table(Vec<Vec<String>>),
}
