//! Metrica CLI
//!
//! Converts lengths, weights, temperatures and pressures.
//!
//! Commands:
//! - menu: interactive numbered menu (default when no command is given)
//! - convert: convert a single value, optionally as JSON
//! - units: list the units of one or all categories
//!
//! Environment:
//! - METRICA_PRECISION: decimal places for displayed results
//! - METRICA_LOG / RUST_LOG: log filter (logs go to stderr)
//! - NO_COLOR: disable colored output

mod commands;
mod config;
mod error;
mod menu;
mod output;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use metrica_units::UnitRegistry;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::commands::{ConvertArgs, Status};
use crate::config::{CliConfig, DEFAULT_LOG_FILTER};
use crate::error::CliResult;
use crate::menu::Menu;

#[derive(Parser)]
#[command(name = "metrica", version)]
#[command(about = "Convert lengths, weights, temperatures and pressures", long_about = None)]
struct Cli {
    /// Decimal places for displayed results
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu
    Menu,
    /// Convert a single value
    Convert {
        /// Category: length, weight, temperature or pressure
        category: String,
        /// Source unit (symbol or name, e.g. "km" or "kilometers")
        from: String,
        /// Target unit
        to: String,
        /// Value in the source unit
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available units
    Units {
        /// Only list this category
        category: Option<String>,
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(config.color)
        .init();
}

fn run(cli: Cli, config: &CliConfig) -> CliResult<Status> {
    let registry = UnitRegistry::standard();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            Menu::new(&registry, config, stdin.lock(), io::stdout()).run()?;
            Ok(Status::Success)
        }
        Commands::Convert {
            category,
            from,
            to,
            value,
            json,
        } => {
            let args = ConvertArgs {
                category: &category,
                from: &from,
                to: &to,
                value,
                json,
            };
            commands::run_convert(&registry, config, &args, &mut io::stdout(), &mut io::stderr())
        }
        Commands::Units { category, json } => commands::run_units(
            &registry,
            config,
            category.as_deref(),
            json,
            &mut io::stdout(),
            &mut io::stderr(),
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::from_env(cli.precision, cli.no_color) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);
    if !config.color {
        colored::control::set_override(false);
    }

    match run(cli, &config) {
        Ok(status) => status.into(),
        Err(e) => {
            error!(%e, "metrica failed");
            eprintln!("{}", output::input_error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
