use std::path::PathBuf;
use std::time::Duration;

use crate::browser::BrowserOptions;
use crate::error::{PagelensError, Result};
use crate::Viewport;

/// Listen port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration resolved from the environment.
///
/// The service has no CLI or config-file surface; everything is env-driven.
/// `PORT` selects the listen port, the `PAGELENS_*` variables tune the
/// browser session.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub browser: BrowserOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            browser: BrowserOptions::default(),
        }
    }
}

impl Config {
    /// Resolve configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an injected lookup, so resolution logic
    /// is testable without mutating process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                PagelensError::Config(format!("Invalid PORT value: {:?}", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let mut browser = BrowserOptions::default();

        if let Some(raw) = lookup("PAGELENS_VIEWPORT") {
            browser.viewport = raw.parse::<Viewport>().map_err(|e| {
                PagelensError::Config(format!("Invalid PAGELENS_VIEWPORT value {:?}: {}", raw, e))
            })?;
        }

        if let Some(raw) = lookup("PAGELENS_NAV_TIMEOUT_SECS") {
            browser.navigation_timeout = Duration::from_secs(parse_secs(
                "PAGELENS_NAV_TIMEOUT_SECS",
                &raw,
            )?);
        }

        if let Some(raw) = lookup("PAGELENS_PROCESS_TIMEOUT_SECS") {
            browser.process_timeout = Duration::from_secs(parse_secs(
                "PAGELENS_PROCESS_TIMEOUT_SECS",
                &raw,
            )?);
        }

        if let Some(cmd) = lookup("PAGELENS_NODE_COMMAND") {
            if !cmd.trim().is_empty() {
                browser.node_command = cmd;
            }
        }

        if let Some(path) = lookup("PAGELENS_MOCK_EXTRACT") {
            if !path.trim().is_empty() {
                browser.mock_extract = Some(PathBuf::from(path));
            }
        }

        Ok(Self { port, browser })
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    let secs = raw.trim().parse::<u64>().map_err(|_| {
        PagelensError::Config(format!("Invalid {} value: {:?}", key, raw))
    })?;
    if secs == 0 {
        return Err(PagelensError::Config(format!(
            "{} must be positive, got 0",
            key
        )));
    }
    Ok(secs)
}
