//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.delegate/config.json`) and environment.
//! The only setting the parser needs is the bot's own Slack user id.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Slack identity settings.
    #[serde(default)]
    pub slack: SlackConfig,
}

/// Slack settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfig {
    /// The bot's own user id (e.g. "U024BE7LH"). Overridden by DELEGATE_SELF_ID env when set.
    pub self_id: Option<String>,
}

/// Resolve the bot user id: env DELEGATE_SELF_ID overrides config. Blank values count as unset.
pub fn resolve_self_id(config: &Config) -> Option<String> {
    std::env::var("DELEGATE_SELF_ID")
        .ok()
        .and_then(|s| non_blank(&s))
        .or_else(|| config.slack.self_id.as_deref().and_then(non_blank))
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("DELEGATE_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".delegate").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load `{"slack": {"selfId": "U..."}}` from the given path, or the default path (or DELEGATE_CONFIG_PATH).
/// A missing file yields an empty config, so the bot id can come from DELEGATE_SELF_ID alone.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
