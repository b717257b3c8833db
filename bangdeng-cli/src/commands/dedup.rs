use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_etl::{CleanupReport, DedupKey, cleanup_duplicates};
use bangdeng_store::DocumentStore;

use crate::CliError;
use crate::config::Settings;
use crate::progress::BarProgress;

pub(crate) fn run_dedup(
    settings: &Settings,
    key: DedupKey,
    dry_run: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let store = settings.open_store()?;
    let report = dedup_store(store.as_ref(), settings, key, dry_run, quiet)?;

    if dry_run {
        for id in &report.duplicates {
            log::info!("  {}", id);
        }
    }
    Ok(())
}

/// Remove stored duplicates and report. Failed deletes are an error.
pub(crate) fn dedup_store(
    store: &dyn DocumentStore,
    settings: &Settings,
    key: DedupKey,
    dry_run: bool,
    quiet: bool,
) -> Result<CleanupReport, CliError> {
    let collection = &settings.collection.value;
    let progress = BarProgress::new(0, quiet || dry_run);
    let report = cleanup_duplicates(store, collection, key, dry_run, &progress)?;

    log::info!(
        "  Scanned {} documents, {} duplicates by {}",
        report.scanned,
        report
            .duplicates
            .len()
            .if_supports_color(Stdout, |t| t.yellow()),
        key,
    );
    if report.failed > 0 {
        return Err(CliError::incomplete(format!(
            "{} duplicate deletes were not committed",
            report.failed
        )));
    }
    Ok(report)
}
