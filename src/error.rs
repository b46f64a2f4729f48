//! Error types for the database facade.

use thiserror::Error;

/// Errors raised by the facade, the backend registry and the backends.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The backend identifier was not configured or is empty.
    #[error("the property \"{0}\" has to be defined and provided with the name of the database system")]
    MissingConfiguration(&'static str),

    /// A backend identifier was configured but no backend is registered for it.
    #[error("the requested database system: {0} is not yet implemented")]
    UnsupportedBackend(String),

    /// The facade was used in a state that does not allow the operation.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A statement was executed without an open connection.
    #[error("no open connection")]
    NotConnected,

    /// Error reported by the SQLite driver.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
