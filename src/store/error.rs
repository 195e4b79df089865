use thiserror::Error;

/// Errors surfaced by a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid document identifier: {0}")]
    InvalidId(String),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// True when the failure means the store could not be reached at all
    pub fn is_connection(&self) -> bool {
        match self {
            StoreError::ConnectionError(_) => true,
            StoreError::Sqlx(err) => matches!(
                err,
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Tls(_)
            ),
            _ => false,
        }
    }
}
