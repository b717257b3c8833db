use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_etl::{AssumeYes, Confirm, PurgeOutcome, PurgePlan, StdinConfirm, purge};

use crate::CliError;
use crate::config::Settings;
use crate::progress::BarProgress;

/// Preview the collection, ask, then delete everything in it.
pub(crate) fn run_purge(settings: &Settings, yes: bool, quiet: bool) -> Result<(), CliError> {
    let store = settings.open_store()?;
    let plan = PurgePlan::prepare(store.as_ref(), &settings.collection.value)?;

    log::info!(
        "{} holds {} documents ({})",
        plan.collection.if_supports_color(Stdout, |t| t.bold()),
        plan.len(),
        settings.store_label(),
    );
    if plan.is_empty() {
        return Ok(());
    }
    log::info!("First {}:", plan.preview().len());
    for (i, (name, kind)) in plan.preview().into_iter().enumerate() {
        log::info!("  {}. {} - {}", i + 1, name, kind);
    }
    crate::log_blank();

    let confirm: &dyn Confirm = if yes { &AssumeYes } else { &StdinConfirm };
    let progress = BarProgress::new(plan.len(), quiet);
    match purge(store.as_ref(), &plan, confirm, &progress)? {
        PurgeOutcome::Cancelled => log::info!("Cancelled. Nothing was deleted."),
        PurgeOutcome::Deleted(n) if n < plan.len() => {
            return Err(CliError::incomplete(format!(
                "only {} of {} documents were deleted",
                n,
                plan.len()
            )));
        }
        PurgeOutcome::Deleted(n) => log::info!(
            "{} Deleted {} documents",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            n
        ),
    }
    Ok(())
}
