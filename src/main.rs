//! revealdeck - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// revealdeck - scroll through a case study with staged reveals and animated statistics
#[derive(Parser, Debug)]
#[command(name = "revealdeck")]
#[command(version)]
#[command(about = "Terminal case-study viewer with scroll-driven reveals and counting statistics")]
pub struct Args {
    /// Path to a TOML case-study document (shows the built-in sample if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show sections and statistics in their final state without animation
    #[arg(long)]
    pub reduce_motion: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        // 1. Load config file (or None if missing)
        let config_file = revealdeck::config::load_config_with_precedence(args.config.clone())?;

        // 2. Merge with defaults
        let merged = revealdeck::config::merge_config(config_file);

        // 3. Apply environment variable overrides
        let with_env = revealdeck::config::apply_env_overrides(merged);

        // 4. Apply CLI argument overrides
        // Only override if the flag was explicitly set (true)
        let reduce_motion_override = args.reduce_motion.then_some(true);
        revealdeck::config::apply_cli_overrides(with_env, reduce_motion_override)
    };

    // Initialize tracing with configured log file path.
    // The guard flushes buffered log lines when dropped at the end of main.
    let _log_guard = revealdeck::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    // Detect and load the document (file or built-in sample)
    let document = revealdeck::source::detect_document_source(args.file.clone()).load()?;

    // Run the TUI with the resolved options
    let options = revealdeck::view::RunOptions::from_config(&config, args.no_color);
    revealdeck::view::run_with_document(document, options)?;

    Ok(())
}
