//! Batched writes against a document store.
//!
//! Writes are buffered up to [`MAX_BATCH_WRITES`] and committed atomically.
//! A failed commit loses its whole batch; the loss is logged and counted and
//! writing continues with a fresh batch.

use bangdeng_core::FacilityRecord;
use bangdeng_store::{DocumentStore, MAX_BATCH_WRITES, Write, WriteBatch, record_fields};

use crate::error::EtlError;
use crate::progress::UploadProgress;

/// Outcome of a batched write run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UploadReport {
    /// Writes handed to the writer
    pub attempted: usize,
    /// Writes in batches the store confirmed
    pub confirmed: usize,
    /// Writes in batches whose commit failed
    pub lost: usize,
    pub batches_committed: usize,
    pub batches_failed: usize,
    /// Size of every commit attempt, in order
    pub commit_sizes: Vec<usize>,
    /// One message per failed commit
    pub errors: Vec<String>,
}

impl UploadReport {
    /// True when every attempted write was confirmed.
    pub fn is_complete(&self) -> bool {
        self.lost == 0 && self.confirmed == self.attempted
    }
}

/// Number of commits needed for `n` writes.
pub fn chunk_count(n: usize) -> usize {
    n.div_ceil(MAX_BATCH_WRITES)
}

/// Buffers writes and commits them in batches of at most [`MAX_BATCH_WRITES`].
pub struct BatchWriter<'a> {
    store: &'a dyn DocumentStore,
    progress: &'a dyn UploadProgress,
    batch: WriteBatch,
    total: usize,
    report: UploadReport,
}

impl<'a> BatchWriter<'a> {
    /// `total` is the expected number of writes, used only for progress.
    pub fn new(store: &'a dyn DocumentStore, progress: &'a dyn UploadProgress, total: usize) -> Self {
        Self {
            store,
            progress,
            batch: WriteBatch::new(),
            total,
            report: UploadReport::default(),
        }
    }

    pub fn push(&mut self, write: Write) -> Result<(), EtlError> {
        if self.batch.is_full() {
            self.flush();
        }
        self.batch.push(write)?;
        self.report.attempted += 1;
        Ok(())
    }

    /// Commit the buffered batch, if any.
    pub fn flush(&mut self) {
        if self.batch.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.batch);
        let size = batch.len();
        self.report.commit_sizes.push(size);

        let committed = match self.store.commit(&batch) {
            Ok(()) => {
                self.report.confirmed += size;
                self.report.batches_committed += 1;
                log::debug!("Committed batch of {size} writes");
                true
            }
            Err(e) => {
                log::error!("Batch commit of {size} writes failed: {e}");
                self.report.lost += size;
                self.report.batches_failed += 1;
                self.report.errors.push(e.to_string());
                false
            }
        };

        let done = self.report.confirmed + self.report.lost;
        self.progress.on_batch(done, self.total.max(done), committed);
    }

    /// Commit any partial final batch and return the report.
    pub fn finish(mut self) -> UploadReport {
        self.flush();
        self.report
    }
}

/// Write each record as a new document in `collection`.
pub fn upload_records(
    store: &dyn DocumentStore,
    collection: &str,
    records: &[FacilityRecord],
    progress: &dyn UploadProgress,
) -> Result<UploadReport, EtlError> {
    progress.on_phase(&format!(
        "Uploading {} records to {} ({}, {} batches)",
        records.len(),
        collection,
        store.backend_name(),
        chunk_count(records.len())
    ));

    let mut writer = BatchWriter::new(store, progress, records.len());
    for record in records {
        writer.push(Write::Set {
            collection: collection.to_string(),
            id: store.new_id(),
            fields: record_fields(record),
        })?;
    }
    let report = writer.finish();

    let summary = format!(
        "Upload finished: {} confirmed, {} lost of {} attempted",
        report.confirmed, report.lost, report.attempted
    );
    if report.lost > 0 {
        log::warn!("{summary}");
    }
    progress.on_complete(&summary);
    Ok(report)
}
