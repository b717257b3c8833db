//! The facility ETL steps that sit between sources and the document store:
//! deduplication, batched upload, validation, purge and file type repair.

pub mod dedup;
pub mod error;
pub mod progress;
pub mod purge;
pub mod retype;
pub mod upload;
pub mod validate;

pub use dedup::{
    CleanupReport, DedupKey, DedupOutcome, cleanup_duplicates, dedup_records,
    find_duplicate_documents,
};
pub use error::EtlError;
pub use progress::{LogProgress, SilentProgress, UploadProgress};
pub use purge::{AssumeNo, AssumeYes, Confirm, PurgeOutcome, PurgePlan, StdinConfirm, purge};
pub use retype::{backup_path, retype_csv, retype_rows};
pub use upload::{BatchWriter, UploadReport, chunk_count, upload_records};
pub use validate::{
    InvalidCoordinates, MissingFields, UNKNOWN_LABEL, ValidationReport, validate_collection,
    validate_documents,
};
