//! Script-output types and conversion into extracted items.

use crate::error::{PagelensError, Result};
use crate::types::ExtractedItem;

/// Top-level result printed by the extraction script.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ScriptOutcome {
    pub status: String,
    #[serde(default)]
    pub items: Option<Vec<RawItem>>,
    pub message: Option<String>,
}

/// One raw item as emitted by the in-page extraction routine.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawItem {
    pub tag: String,
    pub content: serde_json::Value,
}

/// Converts raw script items into the crate's wire type, re-trimming text.
pub(crate) fn convert_raw_items(raw: Vec<RawItem>) -> Result<Vec<ExtractedItem>> {
    raw.into_iter().map(convert_item).collect()
}

fn convert_item(raw: RawItem) -> Result<ExtractedItem> {
    match raw.tag.as_str() {
        "h1" => Ok(ExtractedItem::H1(text_content(&raw)?)),
        "h2" => Ok(ExtractedItem::H2(text_content(&raw)?)),
        "h3" => Ok(ExtractedItem::H3(text_content(&raw)?)),
        "p" => Ok(ExtractedItem::P(text_content(&raw)?)),
        "table" => Ok(ExtractedItem::Table(table_content(&raw)?)),
        other => Err(PagelensError::render(format!(
            "Unexpected item tag {:?} in extraction output",
            other
        ))),
    }
}

fn text_content(raw: &RawItem) -> Result<String> {
    match &raw.content {
        serde_json::Value::String(text) => Ok(text.trim().to_string()),
        other => Err(PagelensError::render(format!(
            "Expected text content for {:?} item, got: {}",
            raw.tag, other
        ))),
    }
}

fn table_content(raw: &RawItem) -> Result<Vec<Vec<String>>> {
    let rows = raw.content.as_array().ok_or_else(|| {
        PagelensError::render(format!(
            "Expected row array for table item, got: {}",
            raw.content
        ))
    })?;

    rows.iter()
        .map(|row| {
            let cells = row.as_array().ok_or_else(|| {
                PagelensError::render(format!("Expected cell array in table row, got: {}", row))
            })?;
            cells
                .iter()
                .map(|cell| {
                    cell.as_str().map(|text| text.trim().to_string()).ok_or_else(|| {
                        PagelensError::render(format!(
                            "Expected string table cell, got: {}",
                            cell
                        ))
                    })
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_outcome_deserializes() {
        let json = r#"{
            "status": "ok",
            "items": [
                {"tag": "h1", "content": "Title"},
                {"tag": "table", "content": [["a", "b"], ["c", "d"]]}
            ]
        }"#;

        let outcome: ScriptOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.status, "ok");
        assert_eq!(outcome.items.as_ref().map(Vec::len), Some(2));
        assert!(outcome.message.is_none());
    }

    #[test]
    fn error_outcome_deserializes_without_items() {
        let json = r#"{"status": "error", "message": "navigation failed"}"#;

        let outcome: ScriptOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.status, "error");
        assert!(outcome.items.is_none());
        assert_eq!(outcome.message.as_deref(), Some("navigation failed"));
    }

    #[test]
    fn headings_and_paragraphs_are_trimmed() {
        let raw = vec![
            RawItem {
                tag: "h1".into(),
                content: serde_json::json!("  Hello  "),
            },
            RawItem {
                tag: "p".into(),
                content: serde_json::json!("\n\tbody text\n"),
            },
        ];

        let items = convert_raw_items(raw).unwrap();
        assert_eq!(
            items,
            vec![
                ExtractedItem::H1("Hello".to_string()),
                ExtractedItem::P("body text".to_string()),
            ]
        );
    }

    #[test]
    fn table_preserves_row_and_cell_order() {
        let raw = vec![RawItem {
            tag: "table".into(),
            content: serde_json::json!([[" Name ", "Age"], ["Ada", " 36 "]]),
        }];

        let items = convert_raw_items(raw).unwrap();
        assert_eq!(
            items,
            vec![ExtractedItem::Table(vec![
                vec!["Name".to_string(), "Age".to_string()],
                vec!["Ada".to_string(), "36".to_string()],
            ])]
        );
    }

    #[test]
    fn conversion_preserves_document_order() {
        let raw = vec![
            RawItem {
                tag: "h2".into(),
                content: serde_json::json!("First"),
            },
            RawItem {
                tag: "p".into(),
                content: serde_json::json!("Second"),
            },
            RawItem {
                tag: "h3".into(),
                content: serde_json::json!("Third"),
            },
        ];

        let items = convert_raw_items(raw).unwrap();
        assert_eq!(
            items,
            vec![
                ExtractedItem::H2("First".to_string()),
                ExtractedItem::P("Second".to_string()),
                ExtractedItem::H3("Third".to_string()),
            ]
        );
    }

    #[test]
    fn unexpected_tag_is_an_error() {
        let raw = vec![RawItem {
            tag: "li".into(),
            content: serde_json::json!("item"),
        }];

        let err = convert_raw_items(raw).unwrap_err();
        assert!(format!("{}", err).contains("li"));
    }

    #[test]
    fn non_string_heading_content_is_an_error() {
        let raw = vec![RawItem {
            tag: "h1".into(),
            content: serde_json::json!(["not", "text"]),
        }];

        assert!(convert_raw_items(raw).is_err());
    }

    #[test]
    fn malformed_table_rows_are_an_error() {
        let raw = vec![RawItem {
            tag: "table".into(),
            content: serde_json::json!(["not-a-row"]),
        }];

        assert!(convert_raw_items(raw).is_err());
    }
}
