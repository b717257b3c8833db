use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] bangdeng_core::CoreError),

    #[error(transparent)]
    Source(#[from] bangdeng_source::SourceError),

    #[error(transparent)]
    Store(#[from] bangdeng_store::StoreError),

    #[error(transparent)]
    Etl(#[from] bangdeng_etl::EtlError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Writes were attempted but not confirmed by the store
    #[error("{0}")]
    Incomplete(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn incomplete(msg: impl Into<String>) -> Self {
        Self::Incomplete(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
