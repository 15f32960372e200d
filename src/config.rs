use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            scope: default_scope(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_limit() -> i64 {
    12
}
fn default_scope() -> String {
    "all".to_string()
}
fn default_debounce_ms() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> String {
    "auto".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    // Validate api
    let base = config.api.base_url.trim();
    if base.is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    if !base.starts_with("http://") && !base.starts_with("https://") {
        anyhow::bail!("api.base_url must start with http:// or https://");
    }
    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be > 0");
    }

    // Validate search
    if config.search.limit < 1 {
        anyhow::bail!("search.limit must be >= 1");
    }
    if config.search.debounce_ms > 10_000 {
        anyhow::bail!("search.debounce_ms must be <= 10000");
    }
    match config.search.scope.as_str() {
        "all" | "topics" | "messages" | "atoms" => {}
        other => anyhow::bail!(
            "Unknown search scope: '{}'. Must be all, topics, messages, or atoms.",
            other
        ),
    }

    // Validate output
    match config.output.color.as_str() {
        "auto" | "always" | "never" => {}
        other => anyhow::bail!(
            "Unknown color mode: '{}'. Must be auto, always, or never.",
            other
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml_str)?;
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = parse("[api]\nbase_url = \"http://127.0.0.1:8081\"\n").unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.max_retries, 5);
        assert_eq!(config.search.limit, 12);
        assert_eq!(config.search.scope, "all");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.output.color, "auto");
    }

    #[test]
    fn test_rejects_empty_base_url() {
        assert!(parse("[api]\nbase_url = \"\"\n").is_err());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(parse("[api]\nbase_url = \"ftp://example.com\"\n").is_err());
    }

    #[test]
    fn test_rejects_zero_limit() {
        let toml_str = "[api]\nbase_url = \"http://x\"\n[search]\nlimit = 0\n";
        assert!(parse(toml_str).is_err());
    }

    #[test]
    fn test_rejects_unknown_scope() {
        let toml_str = "[api]\nbase_url = \"http://x\"\n[search]\nscope = \"everything\"\n";
        assert!(parse(toml_str).is_err());
    }

    #[test]
    fn test_rejects_excessive_debounce() {
        let toml_str = "[api]\nbase_url = \"http://x\"\n[search]\ndebounce_ms = 60000\n";
        assert!(parse(toml_str).is_err());
    }

    #[test]
    fn test_rejects_unknown_color_mode() {
        let toml_str = "[api]\nbase_url = \"http://x\"\n[output]\ncolor = \"rainbow\"\n";
        assert!(parse(toml_str).is_err());
    }

    #[test]
    fn test_full_config_parses() {
        let toml_str = r#"
[api]
base_url = "https://kb.internal:8443"
timeout_secs = 10
max_retries = 2

[search]
limit = 25
scope = "messages"
debounce_ms = 150

[output]
color = "never"
"#;
        let config = parse(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://kb.internal:8443");
        assert_eq!(config.search.limit, 25);
        assert_eq!(config.output.color, "never");
    }
}
