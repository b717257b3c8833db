use std::path::PathBuf;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_core::Country;
use bangdeng_etl::{DedupKey, dedup_records};
use bangdeng_source::{
    OverpassClient, OverpassConfig, OverpassQuery, UnknownCategoryPolicy, normalize_element,
    write_records,
};

use crate::CliError;
use crate::config::Settings;

use super::{category_counts, log_distribution};

pub(crate) struct CollectOptions {
    pub country: String,
    pub output: Option<PathBuf>,
    pub dengue_only: bool,
    pub url: Option<String>,
    pub timeout: Option<u64>,
}

/// Query Overpass for one country and write the normalized facilities.
pub(crate) fn run_collect(settings: &Settings, opts: CollectOptions) -> Result<(), CliError> {
    let country = Country::lookup(&opts.country)?;
    let policy = if opts.dengue_only {
        UnknownCategoryPolicy::Reject
    } else {
        UnknownCategoryPolicy::Hospital
    };
    let output = opts
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}_facilities.csv", country.key)));

    let client = OverpassClient::new(OverpassConfig {
        url: opts.url.unwrap_or_else(|| settings.overpass_url.value.clone()),
        timeout: opts
            .timeout
            .map(Duration::from_secs)
            .unwrap_or(settings.overpass_timeout.value),
    })?;

    log::info!(
        "Collecting facilities for {}",
        country.if_supports_color(Stdout, |t| t.bold()),
    );
    let elements = client.fetch_elements(&OverpassQuery::for_country(country));
    if elements.is_empty() {
        log::warn!("No elements returned for {} (the request may have failed)", country);
        return Ok(());
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut rejected = 0usize;
    for (i, element) in elements.iter().enumerate() {
        match normalize_element(element, i, policy) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => rejected += 1,
            Err(e) => {
                log::debug!("  Skipping {}", e);
                skipped += 1;
            }
        }
    }

    let outcome = dedup_records(records, DedupKey::NameAddress);
    write_records(&output, &outcome.kept)?;

    log::info!(
        "{} {} facilities written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        outcome.kept.len(),
        output.display(),
    );
    log::info!(
        "  {} elements, {} without position, {} not dengue-related, {} duplicates",
        elements.len(),
        skipped,
        rejected,
        outcome.duplicates.len(),
    );
    log_distribution(category_counts(&outcome.kept));
    Ok(())
}
