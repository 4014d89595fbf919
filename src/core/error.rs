use crate::core::RecordId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// Natural key already taken by a live record of the same kind.
    #[error("{0}")]
    DuplicateKey(String),

    /// Caller misuse, e.g. delete/update of a record without an id.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Field '{0}' not found in '{1}'")]
    UnknownField(String, String),

    #[error("{kind} with id {id} not found")]
    RecordNotFound { kind: String, id: RecordId },

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DbError {
    /// Failures of the storage engine itself, as opposed to rejected requests.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::LockError(_) | Self::IoError(_) | Self::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

impl<T> From<std::sync::PoisonError<T>> for DbError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
