//! Destructive reset of a collection, behind an explicit confirmation step.
//!
//! [`PurgePlan::prepare`] lists what would be deleted; [`purge`] asks a
//! [`Confirm`] implementation before deleting anything.

use std::io::{self, BufRead, Write as _};

use bangdeng_store::{Document, DocumentStore, Write};

use crate::error::EtlError;
use crate::progress::UploadProgress;
use crate::upload::BatchWriter;

/// How many documents the preview shows.
pub const PREVIEW_LEN: usize = 3;

/// Answers a yes/no question before a destructive operation.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Always says yes. For `--yes` and tests.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Always says no.
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Prompts on stdout and reads one line from stdin. Only `yes` (any case)
/// confirms; anything else, including EOF, declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} (yes/no): ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// A snapshot of the documents a purge would delete.
#[derive(Debug, Clone)]
pub struct PurgePlan {
    pub collection: String,
    pub documents: Vec<Document>,
}

impl PurgePlan {
    pub fn prepare(store: &dyn DocumentStore, collection: &str) -> Result<Self, EtlError> {
        Ok(Self {
            collection: collection.to_string(),
            documents: store.list(collection)?,
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// `(name, type)` of the first few documents.
    pub fn preview(&self) -> Vec<(&str, &str)> {
        self.documents
            .iter()
            .take(PREVIEW_LEN)
            .map(|d| (d.str_field("name"), d.str_field("type")))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    Cancelled,
    /// Number of documents confirmed deleted
    Deleted(usize),
}

/// Delete every document in the plan once `confirm` agrees.
/// Deletes go out in batches of at most 500.
pub fn purge(
    store: &dyn DocumentStore,
    plan: &PurgePlan,
    confirm: &dyn Confirm,
    progress: &dyn UploadProgress,
) -> Result<PurgeOutcome, EtlError> {
    if plan.is_empty() {
        return Ok(PurgeOutcome::Deleted(0));
    }
    let prompt = format!(
        "Delete all {} documents from {}?",
        plan.len(),
        plan.collection
    );
    if !confirm.confirm(&prompt) {
        log::info!("Purge of {} cancelled", plan.collection);
        return Ok(PurgeOutcome::Cancelled);
    }

    progress.on_phase(&format!("Deleting {} documents", plan.len()));
    let mut writer = BatchWriter::new(store, progress, plan.len());
    for doc in &plan.documents {
        writer.push(Write::Delete {
            collection: plan.collection.clone(),
            id: doc.id.clone(),
        })?;
    }
    let report = writer.finish();
    if report.lost > 0 {
        log::warn!("{} deletes failed", report.lost);
    }
    progress.on_complete(&format!("Deleted {} documents", report.confirmed));
    Ok(PurgeOutcome::Deleted(report.confirmed))
}
