use bangdeng_source::SourceError;
use bangdeng_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
