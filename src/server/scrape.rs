//! The `POST /scrape` handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::{info, warn};

use crate::browser::render_and_extract;
use crate::types::{ScrapeRequest, ScrapeResponse};

use super::AppState;

/// Validates the request body, runs one request-scoped browser session, and
/// responds with the extracted items.
pub(crate) async fn scrape(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let url = match parse_request(body).target_url() {
        Ok(url) => url,
        Err(err) => return err.into_response(),
    };

    match render_and_extract(&url, &state.browser).await {
        Ok(data) => {
            info!(url, items = data.len(), "scrape succeeded");
            (StatusCode::OK, Json(ScrapeResponse { url, data })).into_response()
        }
        Err(err) => {
            warn!(url, error = %err, "scrape failed");
            err.into_response()
        }
    }
}

/// Non-object JSON bodies carry no `url` field; they fall through to the
/// missing-URL validation error rather than a framework rejection.
fn parse_request(body: serde_json::Value) -> ScrapeRequest {
    serde_json::from_value(body).unwrap_or_default()
}
