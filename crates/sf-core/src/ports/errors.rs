use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("failed to load {slice}: {source}")]
    Fetch {
        slice: &'static str,
        #[source]
        source: ApiError,
    },
}

/// Every variant collapses into "not authorized" at the gate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("credential rejected (HTTP {status})")]
    Rejected { status: u16 },

    #[error("verification request failed: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session data corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    #[error("no history entry to go back to")]
    NoHistory,
}
