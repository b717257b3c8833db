//! Structural duplicate detection. The first occurrence of a key wins.

use std::collections::HashSet;

use bangdeng_core::FacilityRecord;
use bangdeng_store::{Document, DocumentStore, Write};

use crate::error::EtlError;
use crate::progress::UploadProgress;
use crate::upload::BatchWriter;

/// Which fields make two facilities the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupKey {
    #[default]
    NameAddress,
    Name,
}

impl DedupKey {
    /// Composite key for a name and address. Values are compared verbatim.
    pub fn key(&self, name: &str, address: &str) -> (String, String) {
        match self {
            Self::NameAddress => (name.to_string(), address.to_string()),
            Self::Name => (name.to_string(), String::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAddress => "name+address",
            Self::Name => "name",
        }
    }
}

impl std::fmt::Display for DedupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DedupOutcome {
    pub kept: Vec<FacilityRecord>,
    /// Later occurrences, in input order
    pub duplicates: Vec<FacilityRecord>,
}

/// Keep the first record of each key. Single pass, order-sensitive.
pub fn dedup_records(
    records: impl IntoIterator<Item = FacilityRecord>,
    key: DedupKey,
) -> DedupOutcome {
    let mut seen = HashSet::new();
    let mut outcome = DedupOutcome::default();
    for record in records {
        if seen.insert(key.key(&record.name, &record.address)) {
            outcome.kept.push(record);
        } else {
            log::debug!("Duplicate facility: {} / {}", record.name, record.address);
            outcome.duplicates.push(record);
        }
    }
    outcome
}

/// Ids of documents whose key was already seen earlier in `docs`.
/// Missing name or address fields count as empty strings.
pub fn find_duplicate_documents(docs: &[Document], key: DedupKey) -> Vec<String> {
    let mut seen = HashSet::new();
    docs.iter()
        .filter(|doc| !seen.insert(key.key(doc.str_field("name"), doc.str_field("address"))))
        .map(|doc| doc.id.clone())
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CleanupReport {
    pub scanned: usize,
    /// Ids of duplicate documents found
    pub duplicates: Vec<String>,
    pub deleted: usize,
    /// Deletes in batches whose commit failed
    pub failed: usize,
}

/// Delete stored duplicates from `collection`, in batches of at most 500.
/// With `dry_run`, only reports what would be deleted.
pub fn cleanup_duplicates(
    store: &dyn DocumentStore,
    collection: &str,
    key: DedupKey,
    dry_run: bool,
    progress: &dyn UploadProgress,
) -> Result<CleanupReport, EtlError> {
    progress.on_phase(&format!("Scanning {collection} for duplicates by {key}"));
    let docs = store.list(collection)?;
    let duplicates = find_duplicate_documents(&docs, key);

    let mut report = CleanupReport {
        scanned: docs.len(),
        duplicates,
        ..Default::default()
    };

    if report.duplicates.is_empty() {
        progress.on_complete("No duplicates found");
        return Ok(report);
    }
    if dry_run {
        progress.on_complete(&format!(
            "Would delete {} duplicate documents",
            report.duplicates.len()
        ));
        return Ok(report);
    }

    let mut writer = BatchWriter::new(store, progress, report.duplicates.len());
    for id in &report.duplicates {
        writer.push(Write::Delete {
            collection: collection.to_string(),
            id: id.clone(),
        })?;
    }
    let writes = writer.finish();
    report.deleted = writes.confirmed;
    report.failed = writes.lost;

    progress.on_complete(&format!("Deleted {} duplicate documents", report.deleted));
    Ok(report)
}

#[cfg(test)]
#[path = "tests/dedup_tests.rs"]
mod tests;
