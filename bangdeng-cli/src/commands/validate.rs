use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_etl::{ValidationReport, validate_collection};
use bangdeng_store::DocumentStore;

use crate::CliError;
use crate::config::Settings;

use super::log_distribution;

/// How many offending documents to list per problem.
const LIST_LIMIT: usize = 10;

pub(crate) fn run_validate(settings: &Settings) -> Result<(), CliError> {
    let store = settings.open_store()?;
    validate_store(store.as_ref(), settings)?;
    Ok(())
}

pub(crate) fn validate_store(
    store: &dyn DocumentStore,
    settings: &Settings,
) -> Result<ValidationReport, CliError> {
    let report = validate_collection(store, &settings.collection.value)?;
    log_validation(&report);
    Ok(report)
}

fn log_validation(report: &ValidationReport) {
    log::info!(
        "{}",
        "Validation summary".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Documents:            {:>6}", report.total);
    log::info!(
        "  Missing fields:       {:>6}",
        report.missing_fields.len()
    );
    log::info!(
        "  Invalid coordinates:  {:>6}",
        report.invalid_coordinates.len()
    );
    crate::log_blank();
    log::info!("  Types:");
    log_distribution(
        report
            .category_distribution
            .iter()
            .map(|(label, &count)| (label.as_str(), count)),
    );

    if !report.unknown_categories.is_empty() {
        log::warn!(
            "  Unrecognized types: {}",
            report.unknown_categories.join(", ")
        );
    }
    for m in report.missing_fields.iter().take(LIST_LIMIT) {
        log::warn!("  {} missing {}", m.id, m.fields.join(", "));
    }
    for c in report.invalid_coordinates.iter().take(LIST_LIMIT) {
        log::warn!(
            "  {} has invalid coordinates ({}, {})",
            c.id,
            shown(c.lat.as_ref()),
            shown(c.lng.as_ref())
        );
    }
    let listed = report.missing_fields.len().min(LIST_LIMIT)
        + report.invalid_coordinates.len().min(LIST_LIMIT);
    let problems = report.missing_fields.len() + report.invalid_coordinates.len();
    if problems > listed {
        log::warn!("  ... and {} more", problems - listed);
    }
    if report.is_clean() {
        log::info!(
            "  {}",
            "All documents valid".if_supports_color(Stdout, |t| t.green())
        );
    }
}

fn shown<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}
