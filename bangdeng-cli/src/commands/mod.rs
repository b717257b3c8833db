pub(crate) mod collect;
pub(crate) mod config;
pub(crate) mod countries;
pub(crate) mod dedup;
pub(crate) mod purge;
pub(crate) mod retype;
pub(crate) mod sync;
pub(crate) mod upload;
pub(crate) mod validate;

use std::collections::BTreeMap;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_core::{Category, FacilityRecord};
use bangdeng_etl::{DedupKey, dedup_records};
use bangdeng_source::{UnknownCategoryPolicy, normalize_row, read_rows};

use crate::CliError;

/// Records loaded from a facility file, with what was dropped on the way.
#[derive(Debug, Default)]
pub(crate) struct LoadedRecords {
    pub records: Vec<FacilityRecord>,
    pub rows: usize,
    /// Rows with unreadable or out-of-range coordinates
    pub skipped: usize,
    /// Rows whose type the fallback policy rejected
    pub rejected: usize,
    pub duplicates: usize,
}

/// Read, normalize and optionally deduplicate a facility file.
/// Bad rows are logged and skipped.
pub(crate) fn load_records(
    path: &Path,
    policy: UnknownCategoryPolicy,
    dedup: Option<DedupKey>,
) -> Result<LoadedRecords, CliError> {
    let mut loaded = LoadedRecords::default();

    for row in read_rows(path)? {
        loaded.rows += 1;
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                log::warn!("  Skipping unreadable row: {}", e);
                loaded.skipped += 1;
                continue;
            }
        };
        match normalize_row(&row, policy) {
            Ok(Some(record)) => loaded.records.push(record),
            Ok(None) => loaded.rejected += 1,
            Err(e) => {
                log::warn!("  Skipping {}", e);
                loaded.skipped += 1;
            }
        }
    }

    if let Some(key) = dedup {
        let outcome = dedup_records(std::mem::take(&mut loaded.records), key);
        loaded.duplicates = outcome.duplicates.len();
        loaded.records = outcome.kept;
    }

    log::info!(
        "Loaded {} of {} rows from {} ({} skipped, {} rejected, {} duplicates)",
        loaded.records.len(),
        loaded.rows,
        path.display(),
        loaded.skipped,
        loaded.rejected,
        loaded.duplicates,
    );
    Ok(loaded)
}

/// Count records per category label.
pub(crate) fn category_counts(records: &[FacilityRecord]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.category.label()).or_default() += 1;
    }
    counts
}

/// Print a label/count table, largest first.
pub(crate) fn log_distribution<'a>(counts: impl IntoIterator<Item = (&'a str, usize)>) {
    let mut rows: Vec<(&str, usize)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (label, count) in rows {
        log::info!(
            "    {:<16} {:>6}  {}",
            label.if_supports_color(Stdout, |t| t.cyan()),
            count,
            describe_label(label).if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

/// Display name for a stored label; empty for labels outside the category set.
fn describe_label(label: &str) -> &'static str {
    Category::from_label(label).map_or("", |c| c.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_label_names_known_categories() {
        assert_eq!(describe_label("blood_test"), "Blood Test / Diagnostic Site");
        assert_eq!(describe_label("dengue_center"), "Dengue Center");
        assert_eq!(describe_label("unknown"), "");
        assert_eq!(describe_label("Hospital"), "");
    }
}
