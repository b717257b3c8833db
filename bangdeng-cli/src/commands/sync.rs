use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_etl::{DedupKey, retype_csv};

use crate::CliError;
use crate::cli_types::LoadArgs;
use crate::config::Settings;

use super::dedup::dedup_store;
use super::load_records;
use super::upload::upload_loaded;
use super::validate::validate_store;

/// The full maintenance pass: optional retype, stored-duplicate cleanup,
/// upload, validation. Stops at the first failing step.
pub(crate) fn run_sync(
    settings: &Settings,
    load: &LoadArgs,
    retype: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let store = settings.open_store()?;
    let mut step = 0;
    let mut next = |title: &str| {
        step += 1;
        crate::log_blank();
        log::info!(
            "{}",
            format!("{step}. {title}").if_supports_color(Stdout, |t| t.bold())
        );
    };

    if retype {
        next("Repair facility types");
        let changed = retype_csv(&load.csv)?;
        log::info!("  {} rows retyped", changed);
    }

    next("Clean stored duplicates");
    let key = load.dedup.key().unwrap_or(DedupKey::NameAddress);
    dedup_store(store.as_ref(), settings, key, false, quiet)?;

    next("Upload");
    let loaded = load_records(&load.csv, load.fallback.into(), load.dedup.key())?;
    upload_loaded(store.as_ref(), settings, &loaded, quiet)?;

    next("Validate");
    validate_store(store.as_ref(), settings)?;

    crate::log_blank();
    log::info!(
        "{}",
        "Sync complete".if_supports_color(Stdout, |t| t.green())
    );
    Ok(())
}
