mod cli;
mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{CliArgs, Command};
use crate::config::CliConfig;
use crate::output::emit;

fn main() -> Result<()> {
    config::load_dotenv();
    let args = CliArgs::parse();

    let config = CliConfig::from_env()
        .context("failed to load configuration")?
        .merge_args(args.seconds, args.tz.as_deref())?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "Loaded config");

    match args.command {
        Command::Next { expr, from, count } => {
            emit(&commands::next(&expr, from.as_deref(), count, &config)?, args.json)
        }
        Command::Inactive {
            expr,
            from,
            cross_check,
        } => {
            let report = commands::inactive(&expr, from.as_deref(), cross_check, &config)?;
            emit(&report, args.json)?;
            if !report.agrees() {
                anyhow::bail!("inactive searches disagree for '{}'", expr);
            }
            Ok(())
        }
        Command::Windows { expr, from, count } => {
            emit(&commands::windows(&expr, from.as_deref(), count, &config)?, args.json)
        }
        Command::Check { expr, at } => {
            emit(&commands::check(&expr, at.as_deref(), &config)?, args.json)
        }
    }
}
