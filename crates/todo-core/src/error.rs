use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A list named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Cannot move task from {from} to {to}: list has {len} tasks")]
    InvalidMove { from: usize, to: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Input the user must correct; state is unchanged.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::DuplicateName(_) | Self::InvalidMove { .. }
        )
    }

    /// The referenced list or task no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The storage medium failed to read or write.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Serialization(_) | Self::QuotaExceeded { .. }
        )
    }
}
