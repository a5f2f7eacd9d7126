//! Runtime configuration read from the environment, with built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
/// Placeholder credential; requests fail with 401 until OPENAI_API_KEY is set.
pub const DEFAULT_API_KEY: &str = "sk-replace-me";

#[derive(Clone, Debug)]
pub struct Config {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// `None` keeps the HTTP client's default (no overall timeout).
    pub timeout: Option<Duration>,
    /// Where tracing output goes; logs are dropped when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// | Variable               | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `GPT_TUI_ENDPOINT`     | `https://api.openai.com/v1/chat/completions`  |
    /// | `OPENAI_API_KEY`       | placeholder key                               |
    /// | `GPT_TUI_MODEL`        | `gpt-4o`                                      |
    /// | `GPT_TUI_TIMEOUT_SECS` | unset                                         |
    /// | `GPT_TUI_LOG_FILE`     | unset                                         |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout = match non_empty("GPT_TUI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("GPT_TUI_TIMEOUT_SECS is not a number of seconds: {raw:?}"))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            endpoint: non_empty("GPT_TUI_ENDPOINT").unwrap_or(defaults.endpoint),
            api_key: non_empty("OPENAI_API_KEY").unwrap_or(defaults.api_key),
            model: non_empty("GPT_TUI_MODEL").unwrap_or(defaults.model),
            timeout,
            log_file: non_empty("GPT_TUI_LOG_FILE").map(PathBuf::from),
        })
    }
}
