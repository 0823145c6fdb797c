//! Browser session lifecycle: one headless render and extraction per call.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{PagelensError, Result};
use crate::types::ExtractedItem;
use crate::Viewport;

use super::extract::{convert_raw_items, ScriptOutcome};
use super::playwright::{
    ensure_node_available, ensure_playwright_available, map_script_error, map_script_message,
    map_spawn_error, EXTRACT_SCRIPT,
};

/// Default timeout for page navigation.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the entire Playwright process.
pub const DEFAULT_PROCESS_TIMEOUT: Duration = Duration::from_secs(45);

/// Configuration options for browser sessions.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// The Node.js command to use (default: "node").
    pub node_command: String,
    /// Viewport dimensions for the browser context.
    pub viewport: Viewport,
    /// Timeout for page navigation.
    pub navigation_timeout: Duration,
    /// Timeout for the entire Playwright process.
    pub process_timeout: Duration,
    /// When set, extraction reads a canned script result from this file
    /// instead of launching a browser. Test/offline seam.
    pub mock_extract: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            node_command: "node".to_string(),
            viewport: Viewport::default(),
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            process_timeout: DEFAULT_PROCESS_TIMEOUT,
            mock_extract: None,
        }
    }
}

/// Renders a URL in a fresh headless browser session and extracts headings,
/// paragraphs, and tables from the rendered document.
///
/// Each call owns its session exclusively. The in-page script closes the
/// browser in its `finally` block on success and failure alike, and the
/// whole child process is killed if it outlives `process_timeout`, so a
/// session never survives its request.
pub async fn render_and_extract(
    url: &str,
    options: &BrowserOptions,
) -> Result<Vec<ExtractedItem>> {
    if let Some(path) = &options.mock_extract {
        return extract_from_mock(path);
    }

    // Fail fast if the host is missing Node or Playwright, before paying for
    // a browser launch.
    ensure_node_available(&options.node_command).await?;
    ensure_playwright_available(&options.node_command).await?;

    let mut cmd = Command::new(&options.node_command);
    cmd.arg("-e")
        .arg(EXTRACT_SCRIPT)
        .arg(url)
        .arg(options.viewport.width.to_string())
        .arg(options.viewport.height.to_string())
        .arg(options.navigation_timeout.as_millis().to_string())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let start = Instant::now();
    let mut child = cmd
        .spawn()
        .map_err(|err| map_spawn_error(err, &options.node_command))?;

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_pipe {
            let _ = out.read_to_end(&mut buf).await;
        }
        buf
    });

    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_pipe {
            let _ = err.read_to_end(&mut buf).await;
        }
        buf
    });

    let status = match timeout(options.process_timeout, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(err)) => return Err(PagelensError::Io(err)),
        Err(_) => {
            let _ = child.kill().await;
            let _ = child.wait().await;
            return Err(PagelensError::render(format!(
                "Browser session timed out after {:?}",
                options.process_timeout
            )));
        }
    };

    let stdout = stdout_task.await.unwrap_or_else(|_| Vec::new());
    let stderr = stderr_task.await.unwrap_or_else(|_| Vec::new());

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr);
        return Err(map_script_error(status.to_string(), &stderr));
    }

    let stdout = String::from_utf8_lossy(&stdout);
    let items = parse_script_result(&stdout)?;

    debug!(
        url,
        items = items.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction finished"
    );

    Ok(items)
}

/// Parses the single JSON document the extraction script prints on stdout.
fn parse_script_result(raw: &str) -> Result<Vec<ExtractedItem>> {
    let outcome: ScriptOutcome = serde_json::from_str(raw).map_err(|e| {
        PagelensError::render(format!(
            "Unexpected Playwright output: {} - raw: {}",
            e,
            raw.trim()
        ))
    })?;

    if outcome.status != "ok" {
        let message = outcome
            .message
            .unwrap_or_else(|| format!("Playwright returned non-ok status {}", outcome.status));
        return Err(map_script_message(message));
    }

    let items = outcome.items.ok_or_else(|| {
        PagelensError::render("Playwright returned ok status but no items".to_string())
    })?;

    convert_raw_items(items)
}

fn extract_from_mock(path: &Path) -> Result<Vec<ExtractedItem>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        PagelensError::Config(format!(
            "Failed to read mock extraction file {}: {}",
            path.display(),
            e
        ))
    })?;
    parse_script_result(&raw)
}
