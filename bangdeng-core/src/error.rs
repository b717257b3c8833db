use thiserror::Error;

/// Errors raised while interpreting core domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The text is not a known category label or alias
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// No registered country matches the key or ISO code
    #[error("Unknown country: '{0}'")]
    UnknownCountry(String),
}

impl CoreError {
    pub fn unknown_category(msg: impl Into<String>) -> Self {
        Self::UnknownCategory(msg.into())
    }

    pub fn unknown_country(msg: impl Into<String>) -> Self {
        Self::UnknownCountry(msg.into())
    }
}
