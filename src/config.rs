//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.une-unwrapped.toml` files.

use crate::cli::OutputFormat;
use crate::metrics::heatmap::WeeklyMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = ".une-unwrapped.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Where year documents come from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Document source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the published site. When unset, `data_dir` is read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Resource path under `base_url`; `{year}` is substituted.
    #[serde(default = "default_path_template")]
    pub path_template: String,

    /// Local directory holding the year documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// File name inside `data_dir`; `{year}` is substituted.
    #[serde(default = "default_file_template")]
    pub file_template: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            path_template: default_path_template(),
            data_dir: default_data_dir(),
            file_template: default_file_template(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_path_template() -> String {
    "data/analysis_data_{year}.json".to_string()
}

fn default_data_dir() -> String {
    "public/data".to_string()
}

fn default_file_template() -> String {
    "analysis_data_{year}.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Year loader settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Pause before a cached year is committed, in milliseconds.
    #[serde(default = "default_cache_hit_delay")]
    pub cache_hit_delay_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache_hit_delay_ms: default_cache_hit_delay(),
        }
    }
}

fn default_cache_hit_delay() -> u64 {
    1
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Entries per ranked message list.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Weekly block matrix series: "total" or "average".
    #[serde(default)]
    pub weekly: WeeklyMode,

    /// Output file. When unset, the report goes to stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            format: OutputFormat::default(),
            weekly: WeeklyMode::default(),
            output: None,
        }
    }
}

fn default_top_n() -> usize {
    3
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref base_url) = args.base_url {
            self.source.base_url = Some(base_url.clone());
        }
        if let Some(ref data_dir) = args.data_dir {
            self.source.data_dir = data_dir.display().to_string();
        }
        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }

        if let Some(top) = args.top {
            self.report.top_n = top;
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(weekly) = args.weekly {
            self.report.weekly = weekly;
        }
        if let Some(ref output) = args.output {
            self.report.output = Some(output.display().to_string());
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.base_url, None);
        assert_eq!(config.source.path_template, "data/analysis_data_{year}.json");
        assert_eq!(config.source.timeout(), Duration::from_secs(30));
        assert_eq!(config.loader.cache_hit_delay_ms, 1);
        assert_eq!(config.report.top_n, 3);
        assert_eq!(config.report.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[source]
base_url = "https://une.example"
timeout_seconds = 5

[loader]
cache_hit_delay_ms = 0

[report]
top_n = 2
format = "markdown"
weekly = "average"
output = "unwrapped.md"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.source.base_url.as_deref(), Some("https://une.example"));
        assert_eq!(config.source.timeout_seconds, 5);
        assert_eq!(config.source.data_dir, "public/data");
        assert_eq!(config.loader.cache_hit_delay_ms, 0);
        assert_eq!(config.report.top_n, 2);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert_eq!(config.report.weekly, WeeklyMode::Average);
        assert_eq!(config.report.output.as_deref(), Some("unwrapped.md"));
    }

    #[test]
    fn test_merge_only_given_args() {
        let mut config: Config =
            toml::from_str("[report]\ntop_n = 5\nformat = \"json\"\n").unwrap();

        let args = Args::parse_from(["une-unwrapped", "--top", "2", "--weekly", "average"]);
        config.merge_with_args(&args);

        assert_eq!(config.report.top_n, 2);
        assert_eq!(config.report.weekly, WeeklyMode::Average);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.output, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[source]\ndata_dir = \"data\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.source.data_dir, "data");

        std::fs::write(&path, "[source\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[loader]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.top_n, 3);
    }
}
