//! Playwright integration for headless page extraction.
//!
//! This module contains the inline Playwright script, error mapping, and
//! availability checks for Node.js and Playwright.

use crate::error::{PagelensError, Result};
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Playwright script that navigates to a URL and extracts headings,
/// paragraphs, and tables from the rendered document.
///
/// Prints a single JSON document on stdout:
/// `{"status":"ok","items":[...]}` on success, and a matching
/// `{"status":"error","message":...}` on stderr on failure. The browser is
/// closed in the `finally` block on every path.
pub(crate) const EXTRACT_SCRIPT: &str = r#"
const [, url, width, height, navTimeout] = process.argv;

async function run() {
  let browser;
  try {
    const { chromium } = require('playwright');
    browser = await chromium.launch({ headless: true });
    const context = await browser.newContext({
      viewport: {
        width: parseInt(width, 10),
        height: parseInt(height, 10)
      }
    });
    const page = await context.newPage();
    const navMs = parseInt(navTimeout, 10);

    await page.goto(url, { waitUntil: 'domcontentloaded', timeout: navMs });

    const items = await page.evaluate(() => {
      const structured = [];

      document.querySelectorAll('h1, h2, h3, p, table').forEach(el => {
        if (['H1', 'H2', 'H3', 'P'].includes(el.tagName)) {
          structured.push({ tag: el.tagName.toLowerCase(), content: el.innerText.trim() });
        } else if (el.tagName === 'TABLE') {
          const rows = [...el.querySelectorAll('tr')].map(row =>
            [...row.querySelectorAll('td, th')].map(cell => cell.innerText.trim())
          );
          structured.push({ tag: 'table', content: rows });
        }
      });

      return structured;
    });

    console.log(JSON.stringify({ status: 'ok', items }));
  } catch (err) {
    const message = err && err.message ? err.message : String(err);
    console.error(JSON.stringify({ status: 'error', message }));
    process.exitCode = 1;
  } finally {
    if (browser) {
      await browser.close();
    }
  }
}

run();
"#;

/// Timeout for checking node/playwright availability.
pub(crate) const NODE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Script to check if Playwright is installed.
const PLAYWRIGHT_CHECK_SCRIPT: &str = "require('playwright'); process.stdout.write('ok');";

/// Error result from the Playwright script.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ScriptError {
    pub message: String,
}

/// Maps a spawn error to an appropriate PagelensError.
pub(crate) fn map_spawn_error(err: io::Error, command: &str) -> PagelensError {
    if err.kind() == io::ErrorKind::NotFound {
        PagelensError::Config(format!(
            "Unable to spawn Playwright helper; '{}' was not found on PATH",
            command
        ))
    } else {
        PagelensError::Io(err)
    }
}

/// Maps Playwright stderr output to an appropriate PagelensError.
///
/// Host-setup problems (missing Playwright package) become configuration
/// errors; anything the page itself caused becomes a render error.
pub(crate) fn map_script_error(status_text: impl Into<String>, stderr: &str) -> PagelensError {
    if let Ok(error) = serde_json::from_str::<ScriptError>(stderr) {
        return map_script_message(error.message);
    }

    if stderr
        .to_ascii_lowercase()
        .contains("cannot find module 'playwright'")
    {
        return PagelensError::Config(
            "Playwright npm package is missing; install with `npm install playwright`.".to_string(),
        );
    }

    PagelensError::render(format!(
        "Playwright exited with status {}: {}",
        status_text.into(),
        stderr.trim()
    ))
}

/// Maps a structured script error message to an appropriate PagelensError.
pub(crate) fn map_script_message(message: String) -> PagelensError {
    if message
        .to_ascii_lowercase()
        .contains("cannot find module 'playwright'")
    {
        PagelensError::Config(
            "Playwright npm package is missing; install with `npm install playwright`.".to_string(),
        )
    } else {
        PagelensError::render(message)
    }
}

/// Ensures Node.js is available on the system.
pub(crate) async fn ensure_node_available(node_command: &str) -> Result<()> {
    let mut cmd = Command::new(node_command);
    cmd.arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let status = tokio::time::timeout(NODE_CHECK_TIMEOUT, cmd.status())
        .await
        .map_err(|_| {
            PagelensError::Config(format!(
                "Timed out checking node availability after {:?}",
                NODE_CHECK_TIMEOUT
            ))
        })?
        .map_err(|err| map_spawn_error(err, node_command))?;

    if !status.success() {
        return Err(PagelensError::Config(format!(
            "Node command {:?} is not available (exit {})",
            node_command, status
        )));
    }

    Ok(())
}

/// Ensures the Playwright npm package is installed.
pub(crate) async fn ensure_playwright_available(node_command: &str) -> Result<()> {
    let mut cmd = Command::new(node_command);
    cmd.arg("-e")
        .arg(PLAYWRIGHT_CHECK_SCRIPT)
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let output = tokio::time::timeout(NODE_CHECK_TIMEOUT, cmd.output())
        .await
        .map_err(|_| {
            PagelensError::Config(format!(
                "Timed out checking Playwright availability after {:?}",
                NODE_CHECK_TIMEOUT
            ))
        })?
        .map_err(|err| map_spawn_error(err, node_command))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(map_script_error(format!("{:?}", output.status), &stderr));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_script_error_detects_missing_module() {
        let err = map_script_error(
            "1",
            r#"{"status":"error","message":"Cannot find module 'playwright'"}"#,
        );
        match err {
            PagelensError::Config(msg) => {
                assert!(
                    msg.contains("Playwright npm package is missing"),
                    "expected missing playwright hint, got: {msg}"
                );
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn map_script_error_handles_plain_stderr_missing_module() {
        let err = map_script_error("1", "Error: Cannot find module 'playwright'");
        match err {
            PagelensError::Config(msg) => assert!(
                msg.contains("npm install playwright"),
                "expected npm install hint, got: {msg}"
            ),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn navigation_timeout_is_a_render_error() {
        let err = map_script_error(
            "exit status: 1",
            r#"{"status":"error","message":"Timeout 30000ms exceeded navigating to https://example.com"}"#,
        );
        match err {
            PagelensError::Render(msg) => {
                assert!(msg.contains("Timeout"), "expected timeout message, got: {msg}");
            }
            other => panic!("expected render error, got {other:?}"),
        }
    }

    #[test]
    fn unresolvable_host_is_a_render_error() {
        let err = map_script_message("net::ERR_NAME_NOT_RESOLVED at https://nope.invalid".into());
        assert!(matches!(err, PagelensError::Render(_)));
    }

    #[test]
    fn plain_stderr_preserves_exit_status() {
        let err = map_script_error("exit status: 1", "something went sideways");
        let msg = format!("{}", err);
        assert!(msg.contains("exit status: 1"));
        assert!(msg.contains("something went sideways"));
    }

    #[tokio::test]
    async fn ensure_node_available_fails_for_missing_binary() {
        let result = ensure_node_available("definitely-not-a-binary").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn ensure_playwright_available_fails_for_missing_binary() {
        let result = ensure_playwright_available("definitely-not-a-binary").await;
        assert!(result.is_err());
    }
}
