use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Analysis {0} not found")]
    AnalysisNotFound(i64),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("External service did not answer in time")]
    ExternalServiceTimeout,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error")]
    InternalServerError,
}
