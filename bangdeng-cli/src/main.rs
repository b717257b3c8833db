//! bangdeng CLI
//!
//! Collects dengue-relevant health facilities, repairs and deduplicates them,
//! and keeps a document store collection in sync with the result.

mod cli_types;
mod commands;
mod config;
mod error;
mod logger;
mod progress;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::collect::CollectOptions;
use config::Settings;

pub(crate) use error::CliError;

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("Error: {e}");
        log::logger().flush();
        std::process::exit(1);
    }
    log::logger().flush();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let quiet = cli.quiet;
    let settings = Settings::load(cli.config.as_deref(), cli.store.into())?;

    match cli.command {
        Commands::Countries => commands::countries::run_countries(),
        Commands::Collect {
            country,
            output,
            dengue_only,
            url,
            timeout,
        } => commands::collect::run_collect(
            &settings,
            CollectOptions {
                country,
                output,
                dengue_only,
                url,
                timeout,
            },
        )?,
        Commands::Retype { csv } => commands::retype::run_retype(&csv)?,
        Commands::Upload { load, dry_run } => {
            commands::upload::run_upload(&settings, &load, dry_run, quiet)?
        }
        Commands::Dedup { dry_run, key } => {
            commands::dedup::run_dedup(&settings, key.into(), dry_run, quiet)?
        }
        Commands::Validate => commands::validate::run_validate(&settings)?,
        Commands::Purge { yes } => commands::purge::run_purge(&settings, yes, quiet)?,
        Commands::Sync { load, retype } => {
            commands::sync::run_sync(&settings, &load, retype, quiet)?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings),
            ConfigAction::Path => commands::config::run_config_path(&settings)?,
        },
    }
    Ok(())
}
