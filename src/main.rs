use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use vocalift::app::{run_enhance_command, run_inspect_command};
use vocalift::cli::{Cli, Commands, ConfigAction};
use vocalift::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    tracing::debug!(version = %vocalift::version_string(), "starting");

    match cli.command {
        Commands::Enhance(args) => {
            let config = load_config(cli.config.as_deref())?;
            run_enhance_command(config, args, cli.quiet).await?;
        }
        Commands::Inspect { input, json } => {
            run_inspect_command(&input, json).await?;
        }
        Commands::Config { action } => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "vocalift", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise -q/-v pick the level.
fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vocalift={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/vocalift/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = match custom_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let default_path = Config::default_path()?;
            Config::load_or_default(&default_path)
                .with_context(|| format!("Failed to load config from {}", default_path.display()))?
        }
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}

/// Handle configuration commands.
fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(custom_path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            let path = match custom_path {
                Some(path) => path.to_path_buf(),
                None => Config::default_path()?,
            };
            println!("{}", path.display());
        }
    }
    Ok(())
}
