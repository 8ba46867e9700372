use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Failure reported by an [`ExternalOpener`](crate::domain::ports::ExternalOpener).
///
/// Neither variant is fatal: the interceptor logs it and keeps the in-surface
/// navigation suppressed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OpenError {
    #[error("no handler registered for scheme '{0}'")]
    NoHandler(String),
    #[error("external launch failed: {0}")]
    LaunchFailed(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
