//! HTTP surface: router construction and the serve loop.

mod scrape;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::browser::BrowserOptions;
use crate::config::Config;
use crate::error::Result;

/// Shared state for request handlers.
pub struct AppState {
    pub browser: BrowserOptions,
}

/// Builds the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scrape", post(scrape::scrape))
        // Health check
        .route("/", get(|| async { "ok" }))
        .with_state(state)
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

/// Binds the configured port and serves until the process exits.
pub async fn serve(config: Config) -> Result<()> {
    let state = Arc::new(AppState {
        browser: config.browser,
    });
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("pagelens listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
