use anyhow::Result;
use clap::{Parser, Subcommand};

use etsm::cli::{self, OutputFormat};
use etsm::config::{self, EtsmConfig};
use etsm::generator::DatasetGenerator;
use etsm::insight::credential::ApiKey;
use etsm::web;

#[derive(Debug, Parser)]
#[command(name = "etsm")]
#[command(about = "Enterprise Technical Success Manager dashboard")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Monthly API usage with headline metrics and growth by company
    Usage {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Strategy board and pipeline overview
    Strategies {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Seed for reproducible data (the board itself is fixed)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Executive relationship table
    Executives {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Account planning table
    Planning {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Per-account totals and health indicators
    Overview {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Ask the model for a strategic analysis of the account portfolio
    Analyze {
        /// Custom prompt (default: generated account-analysis prompt)
        #[arg(long)]
        prompt: Option<String>,
        /// Model identifier (default: from config)
        #[arg(long)]
        model: Option<String>,
        /// Print the prompt before sending it
        #[arg(long)]
        show_prompt: bool,
        /// Seed for the usage data behind the default prompt
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Launch the local web dashboard
    Serve {
        /// Bind address (default: from config)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Check credential and configuration status
    Health,
    /// Manage etsm configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write the default config to ~/.etsm/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print config file locations
    Path,
}

fn generator_for(config: &EtsmConfig, seed: Option<u64>) -> DatasetGenerator {
    let generator = DatasetGenerator::new(config.generator.clone());
    match seed {
        Some(seed) => generator.with_seed(seed),
        None => generator,
    }
}

fn main() -> Result<()> {
    let app = App::parse();
    let (config, warnings) = config::load_with_warnings();

    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .init();
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let api_key = ApiKey::from_env();

    match app.command {
        Commands::Usage { format, seed } => cli::run_usage(
            &generator_for(&config, seed),
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Strategies { format, seed } => cli::run_strategies(
            &generator_for(&config, seed),
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Executives { format, seed } => cli::run_executives(
            &generator_for(&config, seed),
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Planning { format, seed } => cli::run_planning(
            &generator_for(&config, seed),
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Overview { format, seed } => cli::run_overview(
            &generator_for(&config, seed),
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Analyze {
            prompt,
            model,
            show_prompt,
            seed,
        } => cli::run_analyze(
            &config,
            &generator_for(&config, seed),
            api_key.as_ref(),
            prompt,
            model,
            show_prompt,
        ),
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.web.addr.clone());
            web::serve(&addr, config, api_key)
        }
        Commands::Health => cli::run_health(&config, api_key.as_ref()),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&config),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Path => cli::run_config_path(),
        },
    }
}
