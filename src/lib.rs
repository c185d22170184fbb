//! labtrack library root.
//! Exposes the CLI parser, the high-level run() function and the domain modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use chrono::NaiveDate;
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use utils::date::{now_iso, parse_date, today};

/// Current date, pinned by `--today` when given.
fn resolve_today(cli: &Cli) -> AppResult<NaiveDate> {
    match &cli.today {
        Some(raw) => parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.clone())),
        None => Ok(today()),
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let today = resolve_today(cli)?;
    // a pinned date also pins recorded timestamps
    let now = match cli.today {
        Some(_) => today.to_string(),
        None => now_iso(),
    };

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Cycles { .. } => cli::commands::cycles::handle(&cli.command, cfg, cli.test),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Due { .. } => cli::commands::due::handle(&cli.command, cfg, today),
        Commands::Dashboard => cli::commands::dashboard::handle(cfg, today),
        Commands::Employees => cli::commands::employees::handle(cfg),
        Commands::Cp { .. } => cli::commands::cp::handle(&cli.command, cfg),
        Commands::Trip { .. } => cli::commands::trip::handle(&cli.command, cfg, today),
        Commands::Lab { .. } => cli::commands::lab::handle(&cli.command, cfg, &now),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, today),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load()?;

    // snapshot override from the command line
    if let Some(custom) = &cli.data {
        cfg.data_file = custom.clone();
    }

    dispatch(&cli, &cfg)
}
