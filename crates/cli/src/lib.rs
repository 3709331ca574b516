pub mod closet_file;
pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use myclo_core::config::{AppConfig, ConfigError, LoadOptions, LogFormat};
use myclo_core::ApplicationError;

use crate::commands::recommend::RecommendArgs;
use crate::commands::search::SearchArgs;
use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "myclo",
    about = "Myclo wardrobe CLI",
    long_about = "Suggest an outfit for the current weather and search a closet file.",
    after_help = "Examples:
  myclo recommend --closet closet.toml --temp 12 --weather rainy
  myclo search --closet closet.toml coat
  myclo config"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Path to myclo.toml (defaults to ./myclo.toml or ./config/myclo.toml)"
    )]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Suggest a top, bottom and outer layer for the given or configured weather")]
    Recommend {
        #[arg(long, help = "Closet file (TOML with [[items]] tables)")]
        closet: PathBuf,
        #[arg(long = "temp", allow_hyphen_values = true, help = "Temperature in whole °C")]
        temperature: Option<String>,
        #[arg(long, help = "Weather condition: sunny, rainy or cloudy")]
        weather: Option<String>,
    },
    #[command(about = "List closet items whose name or type contains the query")]
    Search {
        #[arg(long, help = "Closet file (TOML with [[items]] tables)")]
        closet: PathBuf,
        #[arg(default_value = "", help = "Case-insensitive search text; empty lists everything")]
        query: String,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Recommend { .. } => "recommend",
            Self::Search { .. } => "search",
            Self::Config => "config",
        }
    }
}

pub fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    // Output goes to stderr so stdout stays machine-readable.
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Loads the effective configuration. An explicit `--config` path must exist.
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    let require_file = config_path.is_some();
    AppConfig::load(LoadOptions { config_path, require_file, ..LoadOptions::default() })
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(error) => {
            let message = format!("configuration issue: {error}");
            let result = CommandResult::application_failure(
                cli.command.name(),
                &uuid::Uuid::new_v4().to_string(),
                message.clone(),
                ApplicationError::Configuration(message),
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Recommend { closet, temperature, weather } => {
            commands::recommend::run(&config, RecommendArgs { closet, temperature, weather })
        }
        Command::Search { closet, query } => {
            commands::search::run(&config, SearchArgs { closet, query })
        }
        Command::Config => CommandResult {
            exit_code: 0,
            output: commands::config::run(&config, cli.config.as_deref()),
        },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
