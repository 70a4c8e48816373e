use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised anywhere in a sync run.
///
/// Every variant is fatal for the run. [`SyncError::kind`] folds them onto
/// the three categories callers reason about.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{0}")]
    Configuration(String),

    #[error("Error '{status}' communicating with {service}. Check your {service} configuration.")]
    RemoteStatus { service: &'static str, status: u16 },

    #[error("Failed to reach {service}: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    #[error("Unexpected response from {service}: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },

    #[error("Violation record is missing key field '{field}'")]
    MissingField { field: String },

    #[error("Key field '{field}' holds {kind} value, which cannot identify an issue")]
    UnusableKeyValue { field: String, kind: &'static str },
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid settings, credentials or tracker fields.
    Configuration,
    /// A collaborator answered with a failure or could not be reached.
    RemoteService,
    /// A violation record cannot be grouped.
    Data,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Configuration(_) => ErrorKind::Configuration,
            SyncError::RemoteStatus { .. }
            | SyncError::Transport { .. }
            | SyncError::InvalidResponse { .. } => ErrorKind::RemoteService,
            SyncError::MissingField { .. } | SyncError::UnusableKeyValue { .. } => {
                ErrorKind::Data
            }
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        SyncError::Configuration(message.into())
    }
}
