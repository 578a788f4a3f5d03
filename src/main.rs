//! buscador - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// buscador - terminal client for the hybrid search backend
#[derive(Parser, Debug)]
#[command(name = "buscador")]
#[command(version)]
#[command(about = "Search, capture result columns and export them to CSV")]
pub struct Args {
    /// Backend root URL
    #[arg(long)]
    pub server: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory CSV exports are written to
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Query string restoring a previous search form (query=...&strategy=...)
    #[arg(long)]
    pub params: Option<String>,

    /// Result rows per page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn cli_overrides(&self) -> buscador::config::CliOverrides {
        buscador::config::CliOverrides {
            server_url: self.server.clone(),
            download_dir: self.download_dir.clone(),
            page_size: self.page_size.map(|size| size as usize),
        }
    }
}

fn main() -> Result<(), buscador::model::AppError> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = buscador::config::load_config_with_precedence(args.config.clone())?;
        let merged = buscador::config::merge_config(config_file);
        let with_env = buscador::config::apply_env_overrides(merged);
        buscador::config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    buscador::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let colors = buscador::view::ColorConfig::from_env_and_args(args.no_color);
    buscador::view::run_app(&config, args.params.as_deref(), colors)?;

    Ok(())
}
