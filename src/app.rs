//! The command-line workflow: configure, load, summarize, render.

use crate::cli::{Args, OutputFormat};
use crate::config::{Config, CONFIG_FILE};
use crate::loader::{
    AnalysisSource, DirectorySource, HttpSource, LoadState, LoaderOptions, YearLoader,
};
use crate::models::YearAnalysis;
use crate::report::{self, SummaryOptions, YearSummary};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Load the selected years and write the report. Returns the exit code.
pub async fn run(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let source = build_source(&config)?;
    let options = LoaderOptions {
        cache_hit_delay: Duration::from_millis(config.loader.cache_hit_delay_ms),
    };
    let mut loader = YearLoader::new(source, options);

    let years = args.years();
    let loaded = if args.all {
        load_each(&mut loader, &years, args.quiet).await
    } else {
        load_last(&mut loader, &years, args.quiet).await
    };

    if loaded.is_empty() {
        eprintln!("\n⛔ No data could be loaded for {:?}.", years);
        return Ok(2);
    }

    let summary_options = SummaryOptions {
        top_n: config.report.top_n,
        weekly_mode: config.report.weekly,
        ..SummaryOptions::default()
    };
    let summaries: Vec<YearSummary> = loaded
        .iter()
        .map(|analysis| YearSummary::build(analysis, &summary_options))
        .collect();

    let output = render(&summaries, config.report.format)?;

    match config.report.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path))?;
            if !args.quiet {
                eprintln!("\n✅ Report saved to: {}", path);
            }
        }
        None => print!("{}", output),
    }

    debug!(
        "Done in {:.1}s; cached years: {:?}",
        start_time.elapsed().as_secs_f64(),
        loader.cached_years()
    );

    Ok(0)
}

/// Select and await every year in turn.
pub async fn load_each(
    loader: &mut YearLoader,
    years: &[i32],
    quiet: bool,
) -> Vec<Arc<YearAnalysis>> {
    let mut loaded = Vec::new();

    for &year in years {
        loader.select_year(year);
        let state = wait_with_spinner(loader, year, quiet).await;
        match state.data {
            Some(data) => loaded.push(data),
            None => warn!("Skipping {}: no data", year),
        }
    }

    loaded
}

/// Select every year back to back; only the last selection commits.
pub async fn load_last(
    loader: &mut YearLoader,
    years: &[i32],
    quiet: bool,
) -> Vec<Arc<YearAnalysis>> {
    let Some(&last) = years.last() else {
        return Vec::new();
    };

    for &year in years {
        loader.select_year(year);
    }

    let state = wait_with_spinner(loader, last, quiet).await;
    state.data.into_iter().collect()
}

async fn wait_with_spinner(loader: &YearLoader, year: i32, quiet: bool) -> LoadState {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    spinner.set_message(format!("📥 Cargando {}...", year));

    let state = loader.wait_until_loaded().await;

    match state.data_year() {
        Some(loaded) if loaded == year => {
            spinner.finish_with_message(format!("✅ {} cargado", year));
        }
        _ => spinner.finish_with_message(format!("❌ No se pudo cargar {}", year)),
    }

    state
}

/// Render every summary in the requested format.
pub fn render(summaries: &[YearSummary], format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => {
            report::generate_json_report(summaries).context("Failed to serialize report")?
        }
        OutputFormat::Markdown => summaries
            .iter()
            .map(report::generate_markdown_report)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Text => summaries
            .iter()
            .map(report::generate_text_summary)
            .collect::<String>(),
    };

    Ok(output)
}

/// Pick the HTTP source when a base URL is configured, else the data directory.
pub fn build_source(config: &Config) -> Result<Arc<dyn AnalysisSource>> {
    let source = &config.source;

    match source.base_url {
        Some(ref base_url) => {
            info!("Fetching documents from {}", base_url);
            let http = HttpSource::new(base_url, &source.path_template, source.timeout())
                .context("Failed to build HTTP client")?;
            Ok(Arc::new(http))
        }
        None => {
            info!("Reading documents from {}", source.data_dir);
            Ok(Arc::new(DirectorySource::new(
                &source.data_dir,
                &source.file_template,
            )))
        }
    }
}

/// Load configuration from file or use defaults.
pub fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::heatmap::WeeklyMode;
    use crate::report::summary::tests::sample_analysis;

    const DOCUMENT: &str = r#"{"year": 2024, "total_views": 10, "total_messages": 2,
        "total_replies": 0, "total_reactions": 0, "total_positive_reactions": 0,
        "total_negative_reactions": 0, "total_erased_messages": 0}"#;

    fn directory_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.source.data_dir = dir.display().to_string();
        config.loader.cache_hit_delay_ms = 0;
        config
    }

    fn directory_loader(dir: &std::path::Path) -> YearLoader {
        let config = directory_config(dir);
        YearLoader::new(build_source(&config).unwrap(), LoaderOptions::default())
    }

    #[tokio::test]
    async fn test_load_last_only_reports_final_year() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("analysis_data_2024.json"), DOCUMENT).unwrap();

        let mut loader = directory_loader(dir.path());
        let loaded = load_last(&mut loader, &[2023, 2024], true).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].year, 2024);
    }

    #[tokio::test]
    async fn test_load_each_skips_missing_years() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("analysis_data_2024.json"), DOCUMENT).unwrap();

        let mut loader = directory_loader(dir.path());
        let loaded = load_each(&mut loader, &[2023, 2024], true).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loader.cached_years(), vec![2024]);
    }

    #[test]
    fn test_render_formats() {
        let summaries = vec![YearSummary::build(&sample_analysis(), &SummaryOptions::default())];

        let json = render(&summaries, OutputFormat::Json).unwrap();
        assert!(json.contains("\"year\": 2024"));

        let markdown = render(&summaries, OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# UNE Unwrapped 2024"));

        let text = render(&summaries, OutputFormat::Text).unwrap();
        assert!(text.contains("📊 UNE Unwrapped 2024"));
    }

    #[test]
    fn test_render_average_weekly_matrix() {
        let options = SummaryOptions {
            weekly_mode: WeeklyMode::Average,
            ..SummaryOptions::default()
        };
        let summaries = vec![YearSummary::build(&sample_analysis(), &options)];

        let markdown = render(&summaries, OutputFormat::Markdown).unwrap();
        assert!(!markdown.contains("Patrón semanal de afectaciones (total)"));

        let json = render(&summaries, OutputFormat::Json).unwrap();
        assert!(json.contains("\"mode\": \"average\""));
    }
}
