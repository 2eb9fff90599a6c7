use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_ENDPOINT: &str = "https://glowdesk-relay.example.workers.dev/chat";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Chat-completion endpoint receiving `{messages}` payloads.
    pub endpoint: String,
    /// Optional bearer token, forwarded as an Authorization header.
    pub api_key: Option<String>,
    /// When set, the catalog is fetched from this URL instead of the bundled asset.
    pub catalog_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            catalog_url: None,
        }
    }
}

/// Reads `config.toml` from the data dir. A missing file yields the defaults;
/// a malformed one is a startup error rather than a silent fallback.
pub fn load(dir: &Path) -> anyhow::Result<Config> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}
