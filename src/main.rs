//! UNE Unwrapped - yearly statistics for the UNE Telegram channel
//!
//! A CLI tool that loads the published yearly analysis documents through
//! a cancellable, cached year loader and renders the dashboard figures.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, config, source or report failure)
//!   2 - No data could be loaded for the selected year(s)

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;
use une_unwrapped::app;
use une_unwrapped::cli::Args;
use une_unwrapped::config::{Config, CONFIG_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("UNE Unwrapped v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match app::run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .une-unwrapped.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to point at your data directory or published site.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
