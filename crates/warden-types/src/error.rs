use thiserror::Error;

#[derive(Error, Debug)]
pub enum WardenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Remediation error: {0}")]
    Remediation(String),

    #[error("State persistence error: {0}")]
    StatePersistence(String),

    #[error("State is locked by another tick: {0}")]
    StateLocked(String),

    #[error("Diagnostics error: {0}")]
    Diagnostics(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl WardenError {
    /// Errors that must abort the current tick instead of being absorbed into
    /// classification data or logs.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WardenError::StatePersistence(_)
                | WardenError::StateLocked(_)
                | WardenError::Config(_)
        )
    }
}

impl From<std::io::Error> for WardenError {
    fn from(e: std::io::Error) -> Self {
        WardenError::Io(e.to_string())
    }
}

pub type WardenResult<T> = Result<T, WardenError>;
