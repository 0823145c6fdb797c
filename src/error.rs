use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

/// Fixed message for the missing/invalid `url` field in a scrape request.
pub const MISSING_URL_MESSAGE: &str = "Missing URL in request body";

#[derive(Debug, Error)]
pub enum PagelensError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl PagelensError {
    pub fn validation(message: impl Into<String>) -> Self {
        PagelensError::Validation(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        PagelensError::Render(message.into())
    }

    /// HTTP status this error surfaces as.
    ///
    /// Validation failures are the caller's fault; render failures mean the
    /// upstream page could not be fetched or evaluated; everything else is a
    /// host-side problem.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PagelensError::Validation(_) => StatusCode::BAD_REQUEST,
            PagelensError::Render(_) => StatusCode::BAD_GATEWAY,
            PagelensError::Io(_)
            | PagelensError::Serialization(_)
            | PagelensError::Config(_)
            | PagelensError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message carried in the `{"error": ...}` response body.
    pub fn public_message(&self) -> String {
        match self {
            PagelensError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for PagelensError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.public_message() });
        (self.status_code(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PagelensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_bad_request() {
        let err = PagelensError::validation(MISSING_URL_MESSAGE);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn render_error_maps_to_bad_gateway() {
        let err = PagelensError::render("navigation failed");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn config_error_maps_to_internal_server_error() {
        let err = PagelensError::Config("node missing".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_public_message_is_bare() {
        let err = PagelensError::validation(MISSING_URL_MESSAGE);
        assert_eq!(err.public_message(), MISSING_URL_MESSAGE);
    }

    #[test]
    fn render_public_message_includes_prefix() {
        let err = PagelensError::render("net::ERR_NAME_NOT_RESOLVED");
        assert_eq!(
            err.public_message(),
            "Render error: net::ERR_NAME_NOT_RESOLVED"
        );
    }
}
