//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::metrics::heatmap::WeeklyMode;
use crate::metrics::theme::AVAILABLE_YEARS;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// UNE Unwrapped - yearly statistics for the UNE Telegram channel
///
/// Loads the published yearly analysis documents and renders the
/// dashboard figures as a terminal summary, Markdown or JSON.
///
/// Examples:
///   une-unwrapped --year 2024
///   une-unwrapped --year 2023,2024 --all --format markdown -o unwrapped.md
///   une-unwrapped --base-url https://une-unwrapped.example --year 2025
///   une-unwrapped --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Year(s) to load (comma-separated or repeated)
    ///
    /// Without --all, years are selected one after another and only the
    /// last selection is reported. Defaults to the latest published year.
    #[arg(short, long, value_name = "YEAR", value_delimiter = ',')]
    pub year: Vec<i32>,

    /// Wait for and report every selected year
    #[arg(short, long)]
    pub all: bool,

    /// Base URL of the published site
    ///
    /// When set, documents are fetched over HTTP instead of read from
    /// the data directory.
    #[arg(long, value_name = "URL", env = "UNE_BASE_URL")]
    pub base_url: Option<String>,

    /// Local directory holding analysis_data_{year}.json files
    #[arg(long, value_name = "DIR", env = "UNE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format (text, markdown, json)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Entries per ranked message list
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Weekly block matrix series (total, average)
    #[arg(long, value_name = "MODE")]
    pub weekly: Option<WeeklyMode>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .une-unwrapped.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .une-unwrapped.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Short terminal overview (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Years to select, in order. Falls back to the latest published year.
    pub fn years(&self) -> Vec<i32> {
        if self.year.is_empty() {
            vec![crate::metrics::theme::latest_year()]
        } else {
            self.year.clone()
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        for year in &self.year {
            if !AVAILABLE_YEARS.contains(year) {
                return Err(format!(
                    "No published data for {} (available: {})",
                    year,
                    AVAILABLE_YEARS
                        .iter()
                        .map(|y| y.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }

        if let Some(ref base_url) = self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err("Base URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref dir) = self.data_dir {
            if !dir.is_dir() {
                return Err(format!("Data directory does not exist: {}", dir.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
