use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_etl::{UploadReport, chunk_count, upload_records};
use bangdeng_store::DocumentStore;

use crate::CliError;
use crate::cli_types::LoadArgs;
use crate::config::Settings;
use crate::progress::BarProgress;

use super::{LoadedRecords, category_counts, load_records, log_distribution};

pub(crate) fn run_upload(
    settings: &Settings,
    load: &LoadArgs,
    dry_run: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let loaded = load_records(&load.csv, load.fallback.into(), load.dedup.key())?;

    if dry_run {
        log::info!(
            "Would upload {} records to {} in {} batches:",
            loaded.records.len(),
            settings.collection.value,
            chunk_count(loaded.records.len()),
        );
        log_distribution(category_counts(&loaded.records));
        return Ok(());
    }

    let store = settings.open_store()?;
    upload_loaded(store.as_ref(), settings, &loaded, quiet)
}

/// Upload already-loaded records and report. Lost writes are an error.
pub(crate) fn upload_loaded(
    store: &dyn DocumentStore,
    settings: &Settings,
    loaded: &LoadedRecords,
    quiet: bool,
) -> Result<(), CliError> {
    let progress = BarProgress::new(loaded.records.len(), quiet);
    let report = upload_records(store, &settings.collection.value, &loaded.records, &progress)?;
    log_report(&report);

    if report.lost > 0 {
        return Err(CliError::incomplete(format!(
            "{} of {} writes were not committed",
            report.lost, report.attempted
        )));
    }
    Ok(())
}

fn log_report(report: &UploadReport) {
    log::info!(
        "{}",
        "Upload summary".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Attempted:  {:>8}", report.attempted);
    log::info!(
        "  Confirmed:  {:>8}",
        report.confirmed.if_supports_color(Stdout, |t| t.green())
    );
    if report.lost > 0 {
        log::warn!(
            "  Lost:       {:>8} ({} failed batches)",
            report.lost,
            report.batches_failed
        );
        for e in &report.errors {
            log::warn!("    {}", e);
        }
    }
    log::info!(
        "  Batches:    {:>8}",
        report.batches_committed + report.batches_failed
    );
}
