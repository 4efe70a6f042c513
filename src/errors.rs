use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Amount overflow while {0}")]
    Overflow(&'static str),
}

impl LedgerError {
    /// Returns `true` when the failure came from the filesystem rather than the data.
    pub fn is_io(&self) -> bool {
        match self {
            LedgerError::Io(_) => true,
            LedgerError::Csv(err) => err.is_io_error(),
            _ => false,
        }
    }
}
